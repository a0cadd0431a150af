use contracts::projections::p909_order_boards::dto::BoardKind;
use contracts::shared::status_board::StatusGroupConfig;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Каталог сообщений: ключ -> шаблон с плейсхолдерами `{name}`
    #[serde(default)]
    pub messages: HashMap<String, String>,
    /// Доски по slug (`warehouse`, `delivery`, `completed`)
    #[serde(default)]
    pub boards: BTreeMap<String, BoardConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Каталог со сборкой фронтенда
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "dist".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Фильтр по умолчанию, если не задан RUST_LOG
    pub filter: String,
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=warn".to_string(),
            dir: "target/logs".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PagingConfig {
    pub max_page_size: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self { max_page_size: 500 }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SynthesisConfig {
    /// База для генератора записей; одинаковый seed даёт одинаковые страницы
    #[serde(default)]
    pub seed: u64,
    /// Искусственная задержка ответа (имитация сетевого запроса)
    #[serde(default)]
    pub latency_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub title_key: String,
    pub default_label_key: String,
    /// Итог режима "все". Если не задан: сумма счётчиков всех плиток.
    #[serde(default)]
    pub default_total: Option<u64>,
    /// Префикс номеров заказов
    pub order_prefix: String,
    #[serde(default)]
    pub groups: Vec<StatusGroupConfig>,
}

impl Config {
    /// Доски в порядке `BoardKind::all()`; неизвестный slug: ошибка конфига
    pub fn board_entries(&self) -> anyhow::Result<Vec<(BoardKind, &BoardConfig)>> {
        for slug in self.boards.keys() {
            slug.parse::<BoardKind>()
                .map_err(|e| anyhow::anyhow!("invalid [boards] section: {e}"))?;
        }
        Ok(BoardKind::all()
            .into_iter()
            .filter_map(|kind| self.boards.get(kind.slug()).map(|cfg| (kind, cfg)))
            .collect())
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[logging]
filter = "info,tower_http=warn"
dir = "target/logs"

[paging]
max_page_size = 500

[synthesis]
seed = 20240601
latency_ms = 0

[messages]
"board.warehouse.title" = "China warehouse inbound"
"board.delivery.title" = "Korea delivery"
"board.completed.title" = "Completed orders"
"board.all_orders" = "{title}: all orders"
"segment.user" = "Individual members"
"segment.biz" = "Business members"
"stage.waiting" = "Waiting"
"stage.arrived" = "Arrived"
"stage.inspecting" = "Inspecting"
"stage.hold" = "On hold"
"stage.customs" = "Customs clearance"
"stage.ready" = "Ready to ship"
"stage.shipped" = "Shipped"
"stage.delivered" = "Delivered"
"stage.returned" = "Returned"

[boards.warehouse]
title_key = "board.warehouse.title"
default_label_key = "board.all_orders"
default_total = 332
order_prefix = "CW"

[[boards.warehouse.groups]]
segment = "USER"
title_key = "segment.user"
items = [
    { stage = "WAITING", label_key = "stage.waiting", count = 45 },
    { stage = "ARRIVED", label_key = "stage.arrived", count = 78 },
    { stage = "INSPECTING", label_key = "stage.inspecting", count = 23 },
    { stage = "HOLD", label_key = "stage.hold", count = 9 },
]

[[boards.warehouse.groups]]
segment = "BIZ"
title_key = "segment.biz"
items = [
    { stage = "WAITING", label_key = "stage.waiting", count = 61 },
    { stage = "ARRIVED", label_key = "stage.arrived", count = 84 },
    { stage = "INSPECTING", label_key = "stage.inspecting", count = 27 },
    { stage = "HOLD", label_key = "stage.hold", count = 5 },
]

[boards.delivery]
title_key = "board.delivery.title"
default_label_key = "board.all_orders"
order_prefix = "KD"

[[boards.delivery.groups]]
segment = "USER"
title_key = "segment.user"
items = [
    { stage = "CUSTOMS", label_key = "stage.customs", count = 34 },
    { stage = "READY", label_key = "stage.ready", count = 21 },
    { stage = "SHIPPED", label_key = "stage.shipped", count = 58 },
]

[[boards.delivery.groups]]
segment = "BIZ"
title_key = "segment.biz"
items = [
    { stage = "CUSTOMS", label_key = "stage.customs", count = 40 },
    { stage = "READY", label_key = "stage.ready", count = 17 },
    { stage = "SHIPPED", label_key = "stage.shipped", count = 66 },
]

[boards.completed]
title_key = "board.completed.title"
default_label_key = "board.all_orders"
order_prefix = "CO"

[[boards.completed.groups]]
segment = "USER"
title_key = "segment.user"
items = [
    { stage = "DELIVERED", label_key = "stage.delivered", count = 120 },
    { stage = "RETURNED", label_key = "stage.returned", count = 6 },
]

[[boards.completed.groups]]
segment = "BIZ"
title_key = "segment.biz"
items = [
    { stage = "DELIVERED", label_key = "stage.delivered", count = 210 },
    { stage = "RETURNED", label_key = "stage.returned", count = 4 },
]
"#;

/// Откуда взята конфигурация. Логируется в `main` после инициализации
/// tracing: до неё подписчика ещё нет.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Встроенная конфигурация; `missing` - где искали config.toml
    Embedded { missing: Option<PathBuf> },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "config from {}", path.display()),
            ConfigSource::Embedded { missing: Some(path) } => write!(
                f,
                "default embedded configuration (config.toml not found at {})",
                path.display()
            ),
            ConfigSource::Embedded { missing: None } => {
                write!(f, "default embedded configuration")
            }
        }
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<(Config, ConfigSource)> {
    let candidate = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("config.toml")));

    match candidate {
        Some(path) if path.exists() => {
            let contents = std::fs::read_to_string(&path)?;
            let config = parse_config(&contents)?;
            Ok((config, ConfigSource::File(path)))
        }
        missing => Ok((default_config()?, ConfigSource::Embedded { missing })),
    }
}

pub fn default_config() -> anyhow::Result<Config> {
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.paging.max_page_size == 0 {
        anyhow::bail!("paging.max_page_size must be positive");
    }
    config.board_entries()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = default_config().unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.paging.max_page_size, 500);
        let boards = config.board_entries().unwrap();
        assert_eq!(
            boards.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            BoardKind::all().to_vec()
        );
        assert_eq!(boards[0].1.default_total, Some(332));
        assert_eq!(boards[0].1.groups.len(), 2);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.dir, "target/logs");
        assert!(config.boards.is_empty());
        assert_eq!(config.synthesis.latency_ms, 0);
    }

    #[test]
    fn test_unknown_board_slug_rejected() {
        let raw = r#"
[boards.inbound]
title_key = "t"
default_label_key = "d"
order_prefix = "IN"
"#;
        assert!(parse_config(raw).is_err());
    }

    #[test]
    fn test_zero_max_page_size_rejected() {
        assert!(parse_config("[paging]\nmax_page_size = 0\n").is_err());
    }

    #[test]
    fn test_config_source_describes_origin() {
        let file = ConfigSource::File(PathBuf::from("/opt/boards/config.toml"));
        assert_eq!(file.to_string(), "config from /opt/boards/config.toml");

        let fallback = ConfigSource::Embedded {
            missing: Some(PathBuf::from("/opt/boards/config.toml")),
        };
        assert!(fallback.to_string().contains("not found at /opt/boards/config.toml"));
        assert_eq!(
            ConfigSource::Embedded { missing: None }.to_string(),
            "default embedded configuration"
        );
    }
}
