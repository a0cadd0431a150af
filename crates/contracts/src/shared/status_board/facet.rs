use super::taxonomy::{StatusGroup, StatusItem};
use serde::{Deserialize, Serialize};

/// Активный фильтр доски. `code == None`: режим "все".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelection {
    pub code: Option<String>,
    pub label: String,
}

impl FacetSelection {
    pub fn unfiltered(default_label: impl Into<String>) -> Self {
        Self {
            code: None,
            label: default_label.into(),
        }
    }

    /// Подпись вида `"{группа} > {статус}"`
    pub fn for_item(group: &StatusGroup, item: &StatusItem) -> Self {
        Self {
            code: Some(item.code.clone()),
            label: format!("{} > {}", group.title, item.label),
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.code.is_some()
    }
}

/// Два измерения, закодированные в составном коде фасета
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacetDimensions {
    pub segment: String,
    pub stage: String,
}

impl From<&StatusItem> for FacetDimensions {
    fn from(item: &StatusItem) -> Self {
        Self {
            segment: item.segment.clone(),
            stage: item.stage.clone(),
        }
    }
}

/// Настройки доски для режима без фильтра
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDefaults {
    pub label: String,
    pub total: u64,
}
