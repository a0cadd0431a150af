use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::projections::p909_order_boards::dto::{
    ApiErrorBody, BoardDescriptor, BoardKind, BoardPageQuery, BoardPageResponse,
};
use contracts::shared::status_board::BoardError;
use thiserror::Error;

use crate::projections::p909_order_boards::service::{self, BoardRegistry};

/// Ошибки API досок
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("board not found: {0}")]
    BoardNotFound(String),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("boards are not initialized")]
    NotInitialized,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BoardNotFound(_) => (StatusCode::NOT_FOUND, "board_not_found"),
            ApiError::Board(BoardError::UnknownFacet(_)) => {
                (StatusCode::BAD_REQUEST, "unknown_facet")
            }
            ApiError::Board(BoardError::InvalidRequest(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            ApiError::Board(BoardError::SourceFailed(_)) => {
                (StatusCode::BAD_GATEWAY, "source_failed")
            }
            ApiError::NotInitialized => (StatusCode::SERVICE_UNAVAILABLE, "not_initialized"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!("Board request failed: {}", self);
        } else {
            tracing::warn!("Board request rejected: {}", self);
        }
        let body = ApiErrorBody {
            code: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn registry() -> Result<&'static BoardRegistry, ApiError> {
    service::registry().ok_or(ApiError::NotInitialized)
}

fn parse_board(slug: &str) -> Result<BoardKind, ApiError> {
    slug.parse::<BoardKind>()
        .map_err(|_| ApiError::BoardNotFound(slug.to_string()))
}

/// GET /api/boards
pub async fn list_boards() -> Result<Json<Vec<BoardDescriptor>>, ApiError> {
    Ok(Json(registry()?.descriptors()))
}

/// GET /api/boards/:board
pub async fn get_board(Path(board): Path<String>) -> Result<Json<BoardDescriptor>, ApiError> {
    let kind = parse_board(&board)?;
    registry()?
        .get(kind)
        .map(|b| Json(b.descriptor.clone()))
        .ok_or(ApiError::BoardNotFound(board))
}

/// GET /api/boards/:board/orders?page=&page_size=&code=
pub async fn list_orders(
    Path(board): Path<String>,
    Query(query): Query<BoardPageQuery>,
) -> Result<Json<BoardPageResponse>, ApiError> {
    let kind = parse_board(&board)?;
    let page = service::fetch_board_page(registry()?, kind, &query)
        .await
        .ok_or(ApiError::BoardNotFound(board))??;
    Ok(Json(page))
}
