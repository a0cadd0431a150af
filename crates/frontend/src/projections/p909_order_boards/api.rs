use contracts::projections::p909_order_boards::dto::{
    ApiErrorBody, BoardDescriptor, BoardKind, BoardPageQuery, BoardPageResponse, OrderRecord,
};
use contracts::shared::status_board::{FacetSelection, PageRequest, PageResult};
use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

const API_BASE: &str = "/api/boards";

/// Сколько ждать ответа бэкенда, прежде чем считать запрос неудачным
pub const REQUEST_TIMEOUT_MS: u32 = 15_000;

/// Текст ошибки: сообщение из тела ответа, если бэкенд его прислал
async fn error_text(response: Response) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => format!("HTTP error {}: {}", status, body.message),
        Err(_) => format!("HTTP error: {}", status),
    }
}

async fn load_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(error_text(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET с ограничением по времени: зависший бэкенд превращается в обычную ошибку
async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let request = Box::pin(load_json::<T>(url));
    let deadline = Box::pin(TimeoutFuture::new(REQUEST_TIMEOUT_MS));
    match select(request, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            log::warn!("Request timed out after {} ms: {}", REQUEST_TIMEOUT_MS, url);
            Err("Request timed out".to_string())
        }
    }
}

/// Получить описания всех досок
pub async fn fetch_boards() -> Result<Vec<BoardDescriptor>, String> {
    get_json(API_BASE).await
}

/// Получить описание одной доски (свежие счётчики плиток)
pub async fn fetch_board(board: BoardKind) -> Result<BoardDescriptor, String> {
    get_json(&format!("{}/{}", API_BASE, board.slug())).await
}

/// Получить страницу заказов доски для активного фасета
pub async fn fetch_board_page(
    board: BoardKind,
    facet: &FacetSelection,
    request: PageRequest,
) -> Result<PageResult<OrderRecord>, String> {
    let query = BoardPageQuery::new(request, facet.code.clone());
    let params =
        serde_qs::to_string(&query).map_err(|e| format!("Failed to build query: {}", e))?;
    let url = format!("{}/{}/orders?{}", API_BASE, board.slug(), params);

    let data: BoardPageResponse = get_json(&url).await?;
    Ok(data.into_page_result())
}
