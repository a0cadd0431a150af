//! Компонент чекбокса в заголовке таблицы для выбора всех строк страницы
//!
//! # Примеры
//!
//! ```ignore
//! <TableHeaderCheckbox
//!     selected_count=Signal::derive(move || board.with(|b| b.selected_count()))
//!     row_count=Signal::derive(move || board.with(|b| b.records().len()))
//!     on_change=Callback::new(move |check_all: bool| toggle_all(check_all))
//! />
//! ```

use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

fn checkbox_state(selected: usize, rows: usize) -> CheckboxState {
    if rows == 0 || selected == 0 {
        CheckboxState::Unchecked
    } else if selected >= rows {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

/// Три состояния: unchecked, checked, indeterminate.
/// Клик переключает между "выбрать все" и "снять все".
#[component]
pub fn TableHeaderCheckbox(
    /// Сколько строк страницы выбрано
    #[prop(into)]
    selected_count: Signal<usize>,

    /// Сколько строк на странице
    #[prop(into)]
    row_count: Signal<usize>,

    /// true = выбрать все, false = снять все
    on_change: Callback<bool>,
) -> impl IntoView {
    let state = Signal::derive(move || checkbox_state(selected_count.get(), row_count.get()));

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate нельзя задать атрибутом, только через DOM
    Effect::new(move |_| {
        if let Some(input) = checkbox_ref.get() {
            let current = state.get();
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(matches!(current, CheckboxState::Indeterminate));
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                disabled=move || row_count.get() == 0
                prop:checked=move || matches!(state.get(), CheckboxState::Checked)
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
