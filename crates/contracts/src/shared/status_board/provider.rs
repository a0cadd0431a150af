//! Контракт поставщика страниц: `(фасет, запрос страницы) -> страница + итог`.
//!
//! Один и тот же контракт выполняется и при локальной генерации записей, и
//! при получении их из реального источника.

use super::facet::{BoardDefaults, FacetDimensions, FacetSelection};
use super::paging::{slice, PageRequest, PageRequestError, PageResult, PageSlice};
use super::taxonomy::StatusTaxonomy;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unknown status code: {0}")]
    UnknownFacet(String),

    #[error(transparent)]
    InvalidRequest(#[from] PageRequestError),

    #[error("record source failed: {0}")]
    SourceFailed(String),
}

/// Итог и измерения, к которым сводится активный фасет
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFacet {
    pub total: u64,
    pub dimensions: Option<FacetDimensions>,
}

pub trait PageDataProvider {
    type Record;

    fn taxonomy(&self) -> &StatusTaxonomy;

    fn defaults(&self) -> &BoardDefaults;

    /// Возвращает ровно `slice.length` записей начиная с `slice.start`.
    /// При активном фасете сегмент и этап каждой записи берутся из `facet`.
    fn produce(
        &self,
        facet: Option<&FacetDimensions>,
        slice: PageSlice,
    ) -> Result<Vec<Self::Record>, BoardError>;

    fn resolve(&self, code: Option<&str>) -> Result<ResolvedFacet, BoardError> {
        match code {
            None => Ok(ResolvedFacet {
                total: self.defaults().total,
                dimensions: None,
            }),
            Some(code) => {
                let (_, item) = self
                    .taxonomy()
                    .find(code)
                    .ok_or_else(|| BoardError::UnknownFacet(code.to_string()))?;
                Ok(ResolvedFacet {
                    total: item.count,
                    dimensions: Some(FacetDimensions::from(item)),
                })
            }
        }
    }

    fn fetch_page(
        &self,
        code: Option<&str>,
        request: PageRequest,
    ) -> Result<PageResult<Self::Record>, BoardError> {
        let resolved = self.resolve(code)?;
        let page_slice = slice(request, resolved.total)?;
        let records = self.produce(resolved.dimensions.as_ref(), page_slice)?;
        if records.len() as u64 != page_slice.length {
            return Err(BoardError::SourceFailed(format!(
                "expected {} records, got {}",
                page_slice.length,
                records.len()
            )));
        }
        Ok(PageResult {
            records,
            total: resolved.total,
        })
    }

    fn fetch_for(
        &self,
        facet: &FacetSelection,
        request: PageRequest,
    ) -> Result<PageResult<Self::Record>, BoardError> {
        self.fetch_page(facet.code.as_deref(), request)
    }
}
