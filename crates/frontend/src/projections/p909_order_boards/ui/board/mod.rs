use crate::projections::p909_order_boards::api::fetch_board_page;
use crate::projections::p909_order_boards::state::{
    load_page_size, save_page_size, PAGE_SIZE_OPTIONS,
};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_tiles::StatusTiles;
use crate::shared::components::table::{
    format_krw, format_number_int, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::icons::icon;
use crate::shared::status_board::{ApplyOutcome, BoardController, FacetState, FetchTicket};
use contracts::projections::p909_order_boards::dto::{BoardDescriptor, BoardKind, OrderRecord};
use contracts::shared::status_board::{compound_code, StatusTaxonomy};
use leptos::prelude::*;
use thaw::*;

/// Подпись статуса строки: "Группа > Статус", для неизвестной пары - сырые коды
fn status_caption(taxonomy: &StatusTaxonomy, segment: &str, stage: &str) -> String {
    match taxonomy.find(&compound_code(segment, stage)) {
        Some((group, item)) => format!("{} > {}", group.title, item.label),
        None => format!("{} / {}", segment, stage),
    }
}

/// Доска заказов. Описание доски приходит с бэкенда; если таксономия в нём
/// битая, вместо доски показывается ошибка.
#[component]
pub fn StatusBoard(descriptor: BoardDescriptor) -> impl IntoView {
    let kind = descriptor.board;
    let controller = descriptor
        .taxonomy()
        .map_err(|e| e.to_string())
        .and_then(|taxonomy| {
            BoardController::new(taxonomy, descriptor.defaults(), load_page_size(kind))
                .map_err(|e| e.to_string())
        });

    if !descriptor.default_total_consistent {
        log::warn!(
            "Board '{}': default total {} differs from the sum of status counts",
            kind,
            descriptor.default_total
        );
    }

    match controller {
        Ok(controller) => view! {
            <BoardView kind=kind title=descriptor.title.clone() controller=controller />
        }
        .into_any(),
        Err(e) => view! {
            <div class="alert alert--error">{format!("Ошибка конфигурации доски: {}", e)}</div>
        }
        .into_any(),
    }
}

#[component]
fn BoardView(
    kind: BoardKind,
    title: String,
    controller: BoardController<OrderRecord>,
) -> impl IntoView {
    let groups = controller.taxonomy().groups().to_vec();
    let defaults = controller.defaults().clone();
    let board = RwSignal::new(controller);

    // Ответ применяется через токен: устаревшие ответы контроллер отбросит сам
    let run_fetch = move |ticket: FetchTicket| {
        leptos::task::spawn_local(async move {
            let result = fetch_board_page(kind, &ticket.facet, ticket.request).await;
            match board.try_update(|b| b.apply(ticket.token, result)) {
                Some(ApplyOutcome::Stale) => {
                    log::debug!("Board '{}': dropped stale response #{}", kind, ticket.token)
                }
                Some(ApplyOutcome::Failed) => {
                    log::warn!("Board '{}': request #{} failed", kind, ticket.token)
                }
                Some(ApplyOutcome::Applied) | None => {}
            }
        });
    };

    // Initial load
    Effect::new(move |_| {
        if let Some(ticket) = board.try_update(|b| b.reload()) {
            run_fetch(ticket);
        }
    });

    let reload = move || {
        if let Some(ticket) = board.try_update(|b| b.reload()) {
            run_fetch(ticket);
        }
    };

    let select_tile = move |(group_idx, item_idx): (usize, usize)| {
        if let Some(ticket) = board
            .try_update(|b| b.select_facet(group_idx, item_idx))
            .flatten()
        {
            run_fetch(ticket);
        }
    };

    let clear_tile = move |_| {
        if let Some(ticket) = board.try_update(|b| b.clear_facet()) {
            run_fetch(ticket);
        }
    };

    let go_to_page = move |page: u64| match board.try_update(|b| b.change_page(page)) {
        Some(Ok(ticket)) => run_fetch(ticket),
        Some(Err(e)) => log::warn!("Board '{}': {}", kind, e),
        None => {}
    };

    let change_page_size = move |size: u64| match board.try_update(|b| b.change_page_size(size)) {
        Some(Ok(ticket)) => {
            save_page_size(kind, size);
            run_fetch(ticket);
        }
        Some(Err(e)) => log::warn!("Board '{}': {}", kind, e),
        None => {}
    };

    let is_loading = Signal::derive(move || board.with(|b| b.is_loading()));
    let selected_count = Signal::derive(move || board.with(|b| b.selected_count()));
    let active_code = Signal::derive(move || match board.with(|b| b.facet_state()) {
        FacetState::Filtered(code) => Some(code),
        FacetState::Unfiltered => None,
    });

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("package")}
                    <h1 class="page__title">{title}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| reload()
                        disabled=is_loading
                    >
                        {move || if is_loading.get() { "Загрузка..." } else { "Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <StatusTiles
                    groups=groups
                    default_label=defaults.label.clone()
                    default_total=defaults.total
                    active_code=active_code
                    on_select=Callback::new(select_tile)
                    on_clear=Callback::new(clear_tile)
                />

                <div class="filter-panel-header">
                    <div class="filter-panel-header__left">
                        <span class="filter-panel__title">
                            {move || board.with(|b| b.selection().label.clone())}
                        </span>
                    </div>
                    <div class="filter-panel-header__center">
                        <PaginationControls
                            current_page=Signal::derive(move || board.with(|b| b.page()))
                            total_pages=Signal::derive(move || board.with(|b| b.total_pages()))
                            total_count=Signal::derive(move || board.with(|b| b.total()))
                            page_size=Signal::derive(move || board.with(|b| b.page_size()))
                            on_page_change=Callback::new(go_to_page)
                            on_page_size_change=Callback::new(change_page_size)
                            page_size_options=PAGE_SIZE_OPTIONS.to_vec()
                            disabled=is_loading
                        />
                    </div>
                    <div class="filter-panel-header__right">
                        <Flex gap=FlexGap::Small>
                            <span class="selection-counter">
                                {move || format!("Выбрано: {}", selected_count.get())}
                            </span>
                            // Массовые действия не подключены к бэкенду
                            <Button disabled=true>"Сменить статус"</Button>
                            <Button disabled=true>"Экспорт"</Button>
                        </Flex>
                    </div>
                </div>

                {move || {
                    board.with(|b| b.error().map(str::to_string)).map(|e| view! {
                        <div class="alert alert--error">
                            {format!("Ошибка: {}", e)}
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| reload()
                            >
                                "Повторить"
                            </Button>
                        </div>
                    })
                }}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCheckbox
                                    selected_count=selected_count
                                    row_count=Signal::derive(move || board.with(|b| b.records().len()))
                                    on_change=Callback::new(move |checked: bool| {
                                        board.update(|b| b.toggle_all(checked));
                                    })
                                />
                                <TableHeaderCell resizable=false min_width=60.0>"#"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=160.0>"Номер заказа"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=200.0>"Статус"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=140.0>"Покупатель"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=180.0>"Товар"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=60.0>"Кол-во"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=120.0>"Сумма"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=150.0>"Трек-номер"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=140.0>"Создан"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || board.with(|b| b.records().to_vec())
                                key=|row| row.order_no.clone()
                                children=move |row: OrderRecord| {
                                    let key = row.order_no.clone();
                                    let key_for_change = key.clone();
                                    let status = board.with_untracked(|b| {
                                        status_caption(b.taxonomy(), &row.segment, &row.stage)
                                    });
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                checked=Signal::derive(move || board.with(|b| b.is_selected(&key)))
                                                on_change=Callback::new(move |checked: bool| {
                                                    board.update(|b| b.toggle_row(&key_for_change, checked));
                                                })
                                            />
                                            <TableCell>
                                                <TableCellLayout>{format_number_int(row.position as i64 + 1)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{row.order_no}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{status}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{row.member_name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{row.item_name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.quantity}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_krw(row.amount_krw)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {row.tracking_no.unwrap_or_else(|| "—".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {row.created_at.format("%Y-%m-%d %H:%M").to_string()}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    {move || {
                        let empty = board.with(|b| b.records().is_empty() && !b.is_loading() && b.error().is_none());
                        empty.then(|| view! { <div class="table-empty">"Нет заказов"</div> })
                    }}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::status_board::{StatusGroup, StatusItem};

    #[test]
    fn test_status_caption() {
        let taxonomy = StatusTaxonomy::new(vec![StatusGroup {
            title: "Business members".into(),
            segment: "BIZ".into(),
            items: vec![StatusItem::new("BIZ", "HOLD", "On hold", 5)],
        }])
        .unwrap();
        assert_eq!(status_caption(&taxonomy, "BIZ", "HOLD"), "Business members > On hold");
        assert_eq!(status_caption(&taxonomy, "USER", "HOLD"), "USER / HOLD");
    }
}
