use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Нарушение контракта вызывающей стороной (не восстанавливается)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    #[error("page numbers start at 1")]
    PageOutOfRange,

    #[error("page size must be positive")]
    EmptyPageSize,

    #[error("page size {requested} exceeds the limit of {max}")]
    PageSizeTooLarge { requested: u64, max: u64 },
}

/// Запрос страницы. `page` начинается с 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Result<Self, PageRequestError> {
        let request = Self { page, page_size };
        request.validate()?;
        Ok(request)
    }

    pub fn first(page_size: u64) -> Result<Self, PageRequestError> {
        Self::new(1, page_size)
    }

    pub fn validate(&self) -> Result<(), PageRequestError> {
        if self.page < 1 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if self.page_size == 0 {
            return Err(PageRequestError::EmptyPageSize);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<R> {
    pub records: Vec<R>,
    pub total: u64,
}

/// Какую часть общего итога должна вернуть страница
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSlice {
    pub start: u64,
    pub length: u64,
}

/// Вычисляет `(start, length)` для запроса при известном итоге.
///
/// Итог передаёт вызывающий код (итог фасета или итог доски без фильтра),
/// сама функция о фасетах ничего не знает. Страница за пределами итога:
/// пустой, но валидный результат.
pub fn slice(request: PageRequest, total: u64) -> Result<PageSlice, PageRequestError> {
    request.validate()?;
    let start = (request.page - 1).saturating_mul(request.page_size);
    let length = total.saturating_sub(start).min(request.page_size);
    Ok(PageSlice { start, length })
}

/// Количество страниц для контрола пагинации
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(page: u64, page_size: u64) -> PageRequest {
        PageRequest { page, page_size }
    }

    #[test]
    fn test_second_page_is_full() {
        assert_eq!(
            slice(req(2, 50), 332),
            Ok(PageSlice {
                start: 50,
                length: 50
            })
        );
    }

    #[test]
    fn test_last_page_is_clamped() {
        assert_eq!(
            slice(req(7, 50), 332),
            Ok(PageSlice {
                start: 300,
                length: 32
            })
        );
    }

    #[test]
    fn test_page_past_total_is_empty() {
        assert_eq!(
            slice(req(10, 50), 332),
            Ok(PageSlice {
                start: 450,
                length: 0
            })
        );
        assert_eq!(slice(req(1, 50), 0).unwrap().length, 0);
    }

    #[test]
    fn test_contract_violations_fail() {
        assert_eq!(slice(req(0, 50), 332), Err(PageRequestError::PageOutOfRange));
        assert_eq!(slice(req(1, 0), 332), Err(PageRequestError::EmptyPageSize));
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::first(0).is_err());
    }

    #[test]
    fn test_huge_page_saturates() {
        let s = slice(req(u64::MAX, u64::MAX), 332).unwrap();
        assert_eq!(s.length, 0);
    }

    #[test]
    fn test_slice_bounds_hold_for_all_small_inputs() {
        for total in 0..120u64 {
            for page_size in 1..25u64 {
                for page in 1..10u64 {
                    let s = slice(req(page, page_size), total).unwrap();
                    assert!(s.length <= page_size);
                    assert_eq!(s.start, (page - 1) * page_size);
                    if s.length > 0 {
                        assert!(s.start + s.length <= total);
                    } else {
                        assert!(s.start >= total);
                    }
                }
            }
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(332, 50), 7);
        assert_eq!(total_pages(300, 50), 6);
        assert_eq!(total_pages(0, 50), 0);
        assert_eq!(total_pages(10, 0), 0);
    }
}
