use super::synthesizer::SynthesizedBoard;
use crate::shared::config::Config;
use crate::shared::messages::MessageCatalog;
use async_trait::async_trait;
use contracts::projections::p909_order_boards::dto::{
    BoardDescriptor, BoardKind, BoardPageQuery, BoardPageResponse, OrderRecord,
};
use contracts::shared::status_board::{
    build_taxonomy, BoardDefaults, BoardError, PageDataProvider, PageRequest, PageRequestError,
    PageResult,
};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Источник страниц заказов. Точка подключения реального бэкенда:
/// контракт `(код фасета, запрос) -> страница` одинаков для любой реализации.
#[async_trait]
pub trait OrderPageSource: Send + Sync {
    async fn fetch_page(
        &self,
        code: Option<&str>,
        request: PageRequest,
    ) -> Result<PageResult<OrderRecord>, BoardError>;
}

/// Локальная генерация с опциональной задержкой ответа
pub struct SynthesizedSource {
    board: SynthesizedBoard,
    latency: Duration,
}

impl SynthesizedSource {
    pub fn new(board: SynthesizedBoard, latency: Duration) -> Self {
        Self { board, latency }
    }
}

#[async_trait]
impl OrderPageSource for SynthesizedSource {
    async fn fetch_page(
        &self,
        code: Option<&str>,
        request: PageRequest,
    ) -> Result<PageResult<OrderRecord>, BoardError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.board.fetch_page(code, request)
    }
}

pub struct RegisteredBoard {
    pub descriptor: BoardDescriptor,
    pub source: Arc<dyn OrderPageSource>,
}

/// Все доски приложения. Строится при старте и дальше не меняется.
pub struct BoardRegistry {
    boards: HashMap<BoardKind, RegisteredBoard>,
    max_page_size: u64,
}

static REGISTRY: OnceCell<BoardRegistry> = OnceCell::new();

pub fn initialize_boards(config: &Config) -> anyhow::Result<()> {
    let registry = BoardRegistry::from_config(config)?;
    REGISTRY
        .set(registry)
        .map_err(|_| anyhow::anyhow!("board registry is already initialized"))
}

pub fn registry() -> Option<&'static BoardRegistry> {
    REGISTRY.get()
}

impl BoardRegistry {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = MessageCatalog::new(config.messages.clone());
        let resolve = |key: &str| catalog.resolve(key);
        let latency = Duration::from_millis(config.synthesis.latency_ms);

        let mut boards = HashMap::new();
        for (kind, board_cfg) in config.board_entries()? {
            let taxonomy = build_taxonomy(&board_cfg.groups, &resolve)
                .map_err(|e| anyhow::anyhow!("board '{}': {}", kind, e))?;

            let sum = taxonomy.sum_counts();
            let default_total = board_cfg.default_total.unwrap_or(sum);
            let consistent = default_total == sum;
            if !consistent {
                tracing::warn!(
                    "Board '{}': default total {} differs from the sum of status counts {}",
                    kind,
                    default_total,
                    sum
                );
            }

            let title = catalog.resolve(&board_cfg.title_key);
            let default_label = catalog.format(&board_cfg.default_label_key, &[("title", title.as_str())]);
            let descriptor = BoardDescriptor {
                board: kind,
                title,
                default_label: default_label.clone(),
                default_total,
                default_total_consistent: consistent,
                groups: taxonomy.groups().to_vec(),
            };

            let synthesized = SynthesizedBoard::new(
                kind,
                taxonomy,
                BoardDefaults {
                    label: default_label,
                    total: default_total,
                },
                board_cfg.order_prefix.clone(),
                config.synthesis.seed,
            );

            tracing::info!(
                "Board '{}' ready: {} status codes, default total {}",
                kind,
                descriptor.groups.iter().map(|g| g.items.len()).sum::<usize>(),
                default_total
            );

            boards.insert(
                kind,
                RegisteredBoard {
                    descriptor,
                    source: Arc::new(SynthesizedSource::new(synthesized, latency)),
                },
            );
        }

        Ok(Self {
            boards,
            max_page_size: config.paging.max_page_size,
        })
    }

    pub fn get(&self, kind: BoardKind) -> Option<&RegisteredBoard> {
        self.boards.get(&kind)
    }

    pub fn descriptors(&self) -> Vec<BoardDescriptor> {
        BoardKind::all()
            .into_iter()
            .filter_map(|kind| self.boards.get(&kind))
            .map(|b| b.descriptor.clone())
            .collect()
    }

    /// Проверка запроса, включая верхнюю границу размера страницы
    pub fn validate_request(&self, query: &BoardPageQuery) -> Result<PageRequest, BoardError> {
        let request = query.request()?;
        if request.page_size > self.max_page_size {
            return Err(PageRequestError::PageSizeTooLarge {
                requested: request.page_size,
                max: self.max_page_size,
            }
            .into());
        }
        Ok(request)
    }
}

/// Страница заказов доски. `None`: доска не настроена.
pub async fn fetch_board_page(
    registry: &BoardRegistry,
    kind: BoardKind,
    query: &BoardPageQuery,
) -> Option<Result<BoardPageResponse, BoardError>> {
    let board = registry.get(kind)?;
    let result = async {
        let request = registry.validate_request(query)?;
        let code = query.facet_code();
        let page = board.source.fetch_page(code, request).await?;
        tracing::debug!(
            "Board '{}' page {} (size {}, code {:?}): {} of {}",
            kind,
            request.page,
            request.page_size,
            code,
            page.records.len(),
            page.total
        );
        Ok::<_, BoardError>(BoardPageResponse {
            items: page.records,
            total: page.total,
            page: request.page,
            page_size: request.page_size,
            code: code.map(str::to_string),
        })
    }
    .await;
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::default_config;

    fn registry_from_default() -> BoardRegistry {
        BoardRegistry::from_config(&default_config().unwrap()).unwrap()
    }

    fn query(page: u64, page_size: u64, code: Option<&str>) -> BoardPageQuery {
        BoardPageQuery {
            page,
            page_size,
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_shipped_boards_totals_match_status_counts() {
        let registry = registry_from_default();
        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), 3);
        for d in descriptors {
            let taxonomy = d.taxonomy().unwrap();
            assert_eq!(d.default_total, taxonomy.sum_counts(), "board {}", d.board);
            assert!(d.default_total_consistent);
        }
    }

    #[test]
    fn test_labels_resolved_through_catalog() {
        let registry = registry_from_default();
        let d = &registry.get(BoardKind::Warehouse).unwrap().descriptor;
        assert_eq!(d.title, "China warehouse inbound");
        assert_eq!(d.default_label, "China warehouse inbound: all orders");
        assert_eq!(d.groups[0].items[0].label, "Waiting");
        assert_eq!(d.groups[0].items[0].code, "USER_WAITING");
    }

    #[test]
    fn test_pinned_total_mismatch_is_flagged() {
        let mut config = default_config().unwrap();
        config
            .boards
            .get_mut("delivery")
            .unwrap()
            .default_total = Some(999);
        let registry = BoardRegistry::from_config(&config).unwrap();
        let d = &registry.get(BoardKind::Delivery).unwrap().descriptor;
        assert_eq!(d.default_total, 999);
        assert!(!d.default_total_consistent);
    }

    #[test]
    fn test_duplicate_codes_fail_startup() {
        let mut config = default_config().unwrap();
        let board = config.boards.get_mut("completed").unwrap();
        let dup = board.groups[0].clone();
        board.groups.push(dup);
        assert!(BoardRegistry::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_facet_page_matches_item_count() {
        let registry = registry_from_default();
        let page = fetch_board_page(
            &registry,
            BoardKind::Warehouse,
            &query(1, 50, Some("USER_WAITING")),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(page.total, 45);
        assert_eq!(page.items.len(), 45);
        assert_eq!(page.code.as_deref(), Some("USER_WAITING"));
    }

    #[tokio::test]
    async fn test_unfiltered_pages_clamp_at_total() {
        let registry = registry_from_default();
        let last = fetch_board_page(&registry, BoardKind::Warehouse, &query(7, 50, None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(last.total, 332);
        assert_eq!(last.items.len(), 32);

        let past = fetch_board_page(&registry, BoardKind::Warehouse, &query(10, 50, Some("")))
            .await
            .unwrap()
            .unwrap();
        assert!(past.items.is_empty());
        assert_eq!(past.code, None);
    }

    #[tokio::test]
    async fn test_invalid_requests_are_rejected() {
        let registry = registry_from_default();
        let too_large = fetch_board_page(&registry, BoardKind::Delivery, &query(1, 501, None))
            .await
            .unwrap();
        assert!(matches!(
            too_large,
            Err(BoardError::InvalidRequest(
                PageRequestError::PageSizeTooLarge { .. }
            ))
        ));

        let unknown = fetch_board_page(&registry, BoardKind::Delivery, &query(1, 50, Some("USER_WAITING")))
            .await
            .unwrap();
        assert_eq!(unknown, Err(BoardError::UnknownFacet("USER_WAITING".into())));
    }

    #[tokio::test]
    async fn test_missing_board_returns_none() {
        let mut config = default_config().unwrap();
        config.boards.remove("completed");
        let registry = BoardRegistry::from_config(&config).unwrap();
        assert!(fetch_board_page(&registry, BoardKind::Completed, &query(1, 50, None))
            .await
            .is_none());
        assert_eq!(registry.descriptors().len(), 2);
    }
}
