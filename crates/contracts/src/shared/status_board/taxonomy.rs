//! Таксономия статусов доски: группы (сегмент клиента) и элементы (этап
//! обработки) со счётчиками. Строится один раз при монтировании доски и
//! после этого не меняется.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Ошибки построения таксономии. Любая из них блокирует инициализацию доски.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("duplicate status code: {0}")]
    DuplicateCode(String),

    #[error("empty status code in group '{0}'")]
    EmptyCode(String),

    #[error("negative count {count} for status code {code}")]
    NegativeCount { code: String, count: i64 },
}

/// Плитка статуса: подпись, счётчик и составной код `{segment}_{stage}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusItem {
    pub label: String,
    pub count: u64,
    pub code: String,
    pub segment: String,
    pub stage: String,
}

impl StatusItem {
    /// Собирает элемент, выводя составной код из двух измерений
    pub fn new(segment: &str, stage: &str, label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
            code: compound_code(segment, stage),
            segment: segment.to_string(),
            stage: stage.to_string(),
        }
    }
}

/// Группа статусов одного сегмента
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusGroup {
    pub title: String,
    pub segment: String,
    pub items: Vec<StatusItem>,
}

pub fn compound_code(segment: &str, stage: &str) -> String {
    format!("{}_{}", segment, stage)
}

/// Неизменяемая таксономия с индексом `code -> (group, item)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTaxonomy {
    groups: Vec<StatusGroup>,
    index: HashMap<String, (usize, usize)>,
}

impl StatusTaxonomy {
    pub fn new(groups: Vec<StatusGroup>) -> Result<Self, TaxonomyError> {
        let mut index = HashMap::new();
        for (gi, group) in groups.iter().enumerate() {
            for (ii, item) in group.items.iter().enumerate() {
                if item.code.trim().is_empty() {
                    return Err(TaxonomyError::EmptyCode(group.title.clone()));
                }
                if index.insert(item.code.clone(), (gi, ii)).is_some() {
                    return Err(TaxonomyError::DuplicateCode(item.code.clone()));
                }
            }
        }
        Ok(Self { groups, index })
    }

    pub fn groups(&self) -> &[StatusGroup] {
        &self.groups
    }

    pub fn find(&self, code: &str) -> Option<(&StatusGroup, &StatusItem)> {
        let &(gi, ii) = self.index.get(code)?;
        let group = &self.groups[gi];
        Some((group, &group.items[ii]))
    }

    pub fn get(&self, group_idx: usize, item_idx: usize) -> Option<(&StatusGroup, &StatusItem)> {
        let group = self.groups.get(group_idx)?;
        let item = group.items.get(item_idx)?;
        Some((group, item))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn item_count(&self) -> usize {
        self.index.len()
    }

    /// Сумма всех счётчиков: итог "без фильтра", согласованный с плитками
    pub fn sum_counts(&self) -> u64 {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .map(|i| i.count)
            .sum()
    }

    /// Уникальные сегменты и этапы в порядке появления.
    /// Нужны для генерации записей без фильтра.
    pub fn dimensions(&self) -> (Vec<String>, Vec<String>) {
        let mut segments = Vec::new();
        let mut stages = Vec::new();
        let mut seen_stages = HashSet::new();
        for group in &self.groups {
            if !segments.contains(&group.segment) {
                segments.push(group.segment.clone());
            }
            for item in &group.items {
                if seen_stages.insert(item.stage.clone()) {
                    stages.push(item.stage.clone());
                }
            }
        }
        (segments, stages)
    }
}

// ---------------------------------------------------------------------------
// Сырой конфиг (ключи сообщений вместо текстов, знаковые счётчики)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusItemConfig {
    pub stage: String,
    pub label_key: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusGroupConfig {
    pub segment: String,
    pub title_key: String,
    #[serde(default)]
    pub items: Vec<StatusItemConfig>,
}

impl StatusGroupConfig {
    /// Разрешает тексты через `resolve` и проверяет счётчики
    pub fn build(&self, resolve: &dyn Fn(&str) -> String) -> Result<StatusGroup, TaxonomyError> {
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.count < 0 {
                    return Err(TaxonomyError::NegativeCount {
                        code: compound_code(&self.segment, &item.stage),
                        count: item.count,
                    });
                }
                Ok(StatusItem::new(
                    &self.segment,
                    &item.stage,
                    resolve(&item.label_key),
                    item.count as u64,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StatusGroup {
            title: resolve(&self.title_key),
            segment: self.segment.clone(),
            items,
        })
    }
}

pub fn build_taxonomy(
    groups: &[StatusGroupConfig],
    resolve: &dyn Fn(&str) -> String,
) -> Result<StatusTaxonomy, TaxonomyError> {
    let groups = groups
        .iter()
        .map(|g| g.build(resolve))
        .collect::<Result<Vec<_>, _>>()?;
    StatusTaxonomy::new(groups)
}
