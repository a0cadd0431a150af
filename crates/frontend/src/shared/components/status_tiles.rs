use crate::shared::components::table::format_number_int;
use contracts::shared::status_board::StatusGroup;
use leptos::prelude::*;

/// Плитки статусов доски: одна плитка "все" и по плитке на каждый статус.
/// Активная плитка подсвечивается; повторный клик по ней снова запрашивает данные.
#[component]
pub fn StatusTiles(
    /// Группы плиток в порядке отображения
    groups: Vec<StatusGroup>,

    /// Подпись плитки "все"
    #[prop(into)]
    default_label: String,

    /// Итог плитки "все"
    default_total: u64,

    /// Код активной плитки; None - режим "все"
    #[prop(into)]
    active_code: Signal<Option<String>>,

    /// (индекс группы, индекс плитки)
    on_select: Callback<(usize, usize)>,

    on_clear: Callback<()>,
) -> impl IntoView {
    let tile_class = |active: bool| {
        if active {
            "status-tile status-tile--active"
        } else {
            "status-tile"
        }
    };

    let group_views = groups
        .into_iter()
        .enumerate()
        .map(|(group_idx, group)| {
            let items = group
                .items
                .into_iter()
                .enumerate()
                .map(|(item_idx, item)| {
                    let code = item.code.clone();
                    let is_active =
                        move || active_code.with(|c| c.as_deref() == Some(code.as_str()));
                    view! {
                        <button
                            class=move || tile_class(is_active())
                            on:click=move |_| on_select.run((group_idx, item_idx))
                            title=item.code.clone()
                        >
                            <span class="status-tile__label">{item.label}</span>
                            <span class="status-tile__count">{format_number_int(item.count as i64)}</span>
                        </button>
                    }
                })
                .collect_view();

            view! {
                <div class="status-tiles__group">
                    <div class="status-tiles__group-title">{group.title}</div>
                    <div class="status-tiles__items">{items}</div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="status-tiles">
            <button
                class=move || tile_class(active_code.with(|c| c.is_none()))
                on:click=move |_| on_clear.run(())
            >
                <span class="status-tile__label">{default_label}</span>
                <span class="status-tile__count">{format_number_int(default_total as i64)}</span>
            </button>
            {group_views}
        </div>
    }
}
