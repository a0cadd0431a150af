//! Состояние доски статусов на клиенте. Чистая логика, без Leptos:
//! компоненты держат `BoardController` в сигнале и вызывают его команды.

pub mod board_controller;
pub mod facet_controller;
pub mod row_selection;

pub use board_controller::{ApplyOutcome, BoardController, FetchTicket, RowKey};
pub use facet_controller::{FacetChange, FacetSelectionController, FacetState};
pub use row_selection::RowSelectionController;
