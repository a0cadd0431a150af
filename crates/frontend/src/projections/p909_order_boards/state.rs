//! Размер страницы каждой доски сохраняется в localStorage.
//! Фасет и выделение строк не сохраняются: при повторном открытии доска
//! начинает с режима "все".

use contracts::projections::p909_order_boards::dto::BoardKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 50;
pub const PAGE_SIZE_OPTIONS: [u64; 4] = [20, 50, 100, 200];

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PersistedState {
    pub page_size: u64,
}

fn storage_key(board: BoardKind) -> String {
    format!("p909_order_boards_{}_state_v1", board.slug())
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Сохранённый размер страницы; невалидные значения игнорируются
pub fn load_page_size(board: BoardKind) -> u64 {
    storage()
        .and_then(|s| s.get_item(&storage_key(board)).ok().flatten())
        .and_then(|raw| serde_json::from_str::<PersistedState>(&raw).ok())
        .map(|p| p.page_size)
        .filter(|size| PAGE_SIZE_OPTIONS.contains(size))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

pub fn save_page_size(board: BoardKind, page_size: u64) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(&PersistedState { page_size }) else {
        return;
    };
    let _ = storage.set_item(&storage_key(board), &raw);
}
