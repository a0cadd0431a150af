pub mod api;
pub mod state;
pub mod ui;

use crate::shared::status_board::RowKey;
use contracts::projections::p909_order_boards::dto::OrderRecord;

impl RowKey for OrderRecord {
    fn row_key(&self) -> String {
        self.order_no.clone()
    }
}
