//! Компонент чекбокса в ячейке таблицы для выбора отдельной строки
//!
//! # Примеры
//!
//! ```ignore
//! <TableCellCheckbox
//!     checked=Signal::derive(move || board.with(|b| b.is_selected(&key)))
//!     on_change=Callback::new(move |checked| toggle_row(key.clone(), checked))
//! />
//! ```

use leptos::prelude::*;
use thaw::*;

/// Останавливает propagation клика, чтобы не вызывать клик на строке
#[component]
pub fn TableCellCheckbox(
    #[prop(into)]
    checked: Signal<bool>,

    on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableCell>
    }
}
