use crate::shared::status_board::{
    BoardDefaults, PageRequest, PageRequestError, PageResult, StatusGroup, StatusTaxonomy,
    TaxonomyError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Очередь заказов, для которой строится доска статусов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardKind {
    /// Приёмка на складе в Китае
    Warehouse,
    /// Доставка по Корее
    Delivery,
    /// Завершённые заказы
    Completed,
}

impl BoardKind {
    pub fn all() -> [BoardKind; 3] {
        [BoardKind::Warehouse, BoardKind::Delivery, BoardKind::Completed]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            BoardKind::Warehouse => "warehouse",
            BoardKind::Delivery => "delivery",
            BoardKind::Completed => "completed",
        }
    }
}

impl fmt::Display for BoardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for BoardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardKind::all()
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| format!("unknown board: {}", s))
    }
}

/// Строка таблицы доски (заказ на выкуп/доставку)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Номер заказа, ключ строки для выделения
    pub order_no: String,
    /// Абсолютная позиция в выборке
    pub position: u64,
    pub segment: String,
    pub stage: String,
    pub member_name: String,
    pub item_name: String,
    pub quantity: u32,
    pub amount_krw: i64,
    pub tracking_no: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Описание доски: таксономия плиток и настройки режима "все"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDescriptor {
    pub board: BoardKind,
    pub title: String,
    pub default_label: String,
    pub default_total: u64,
    /// `false`, если итог "все" в конфиге расходится с суммой плиток
    pub default_total_consistent: bool,
    pub groups: Vec<StatusGroup>,
}

impl BoardDescriptor {
    pub fn taxonomy(&self) -> Result<StatusTaxonomy, TaxonomyError> {
        StatusTaxonomy::new(self.groups.clone())
    }

    pub fn defaults(&self) -> BoardDefaults {
        BoardDefaults {
            label: self.default_label.clone(),
            total: self.default_total,
        }
    }
}

/// Query-параметры `GET /api/boards/:board/orders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    50
}

impl BoardPageQuery {
    pub fn new(request: PageRequest, code: Option<String>) -> Self {
        Self {
            page: request.page,
            page_size: request.page_size,
            code,
        }
    }

    pub fn request(&self) -> Result<PageRequest, PageRequestError> {
        PageRequest::new(self.page, self.page_size)
    }

    /// Пустой код в query трактуется как отсутствие фильтра
    pub fn facet_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Ответ со страницей заказов доски
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardPageResponse {
    pub items: Vec<OrderRecord>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub code: Option<String>,
}

impl BoardPageResponse {
    pub fn into_page_result(self) -> PageResult<OrderRecord> {
        PageResult {
            records: self.items,
            total: self.total,
        }
    }
}

/// Тело ответа с ошибкой
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}
