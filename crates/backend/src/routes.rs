use axum::{routing::get, Router};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // P909 ORDER STATUS BOARDS
        // ========================================
        .route("/api/boards", get(handlers::p909_order_boards::list_boards))
        .route(
            "/api/boards/:board",
            get(handlers::p909_order_boards::get_board),
        )
        .route(
            "/api/boards/:board/orders",
            get(handlers::p909_order_boards::list_orders),
        )
}
