use crate::projections::p909_order_boards::api::{fetch_board, fetch_boards};
use crate::projections::p909_order_boards::ui::board::StatusBoard;
use contracts::projections::p909_order_boards::dto::{BoardDescriptor, BoardKind};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let (boards, set_boards) = signal(Vec::<BoardDescriptor>::new());
    let (error, set_error) = signal(Option::<String>::None);
    let active = RwSignal::new(Option::<BoardKind>::None);

    // Load board descriptors on mount
    Effect::new(move |_| {
        leptos::task::spawn_local(async move {
            match fetch_boards().await {
                Ok(list) => {
                    log::info!("Loaded {} boards", list.len());
                    if active.get_untracked().is_none() {
                        active.set(list.first().map(|d| d.board));
                    }
                    set_boards.set(list);
                }
                Err(e) => {
                    log::error!("Failed to fetch boards: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    });

    // При открытии вкладки описание доски перечитывается: счётчики плиток могли измениться
    let open_board = move |kind: BoardKind| {
        leptos::task::spawn_local(async move {
            match fetch_board(kind).await {
                Ok(fresh) => set_boards.update(|list| {
                    if let Some(slot) = list.iter_mut().find(|d| d.board == kind) {
                        *slot = fresh;
                    }
                }),
                Err(e) => log::warn!("Failed to refresh board '{}': {}", kind, e),
            }
            active.set(Some(kind));
        });
    };

    let active_descriptor = Memo::new(move |_| {
        let kind = active.get()?;
        boards.with(|list| list.iter().find(|d| d.board == kind).cloned())
    });

    view! {
        <div class="app">
            <nav class="app__tabs">
                {move || boards.get().into_iter().map(|d| {
                    let kind = d.board;
                    view! {
                        <button
                            class=move || if active.get() == Some(kind) { "app__tab app__tab--active" } else { "app__tab" }
                            on:click=move |_| open_board(kind)
                        >
                            {d.title}
                        </button>
                    }
                }).collect_view()}
            </nav>

            {move || error.get().map(|e| view! {
                <div class="alert alert--error">{format!("Ошибка: {}", e)}</div>
            })}

            // Доска пересоздаётся при смене вкладки и начинает с режима "все"
            {move || active_descriptor.get().map(|descriptor| view! {
                <StatusBoard descriptor=descriptor />
            })}
        </div>
    }
}
