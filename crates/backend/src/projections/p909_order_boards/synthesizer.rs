//! Генерация тестовых заказов для досок.
//!
//! Поля заказа случайные, но детерминированы для пары (фасет, позиция):
//! повторный запрос той же страницы вернёт те же номера заказов.

use chrono::{Duration, Utc};
use contracts::projections::p909_order_boards::dto::{BoardKind, OrderRecord};
use contracts::shared::status_board::{
    BoardDefaults, BoardError, FacetDimensions, PageDataProvider, PageSlice, StatusTaxonomy,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const MEMBER_NAMES: &[&str] = &[
    "Kim Minji",
    "Lee Jihoon",
    "Park Seoyeon",
    "Choi Hyunwoo",
    "Jung Yuna",
    "Kang Dohyun",
    "Yoon Sora",
    "Han Jiwon",
];

const ITEM_NAMES: &[&str] = &[
    "Wireless earbuds",
    "Cotton hoodie",
    "Phone case",
    "Ceramic tea set",
    "Desk lamp",
    "Running shoes",
    "Silk scarf",
    "Mechanical keyboard",
];

/// Доска, записи которой генерируются локально
#[derive(Debug, Clone)]
pub struct SynthesizedBoard {
    kind: BoardKind,
    taxonomy: StatusTaxonomy,
    defaults: BoardDefaults,
    order_prefix: String,
    seed: u64,
    segments: Vec<String>,
    stages: Vec<String>,
}

impl SynthesizedBoard {
    pub fn new(
        kind: BoardKind,
        taxonomy: StatusTaxonomy,
        defaults: BoardDefaults,
        order_prefix: impl Into<String>,
        seed: u64,
    ) -> Self {
        let (segments, stages) = taxonomy.dimensions();
        Self {
            kind,
            taxonomy,
            defaults,
            order_prefix: order_prefix.into(),
            seed,
            segments,
            stages,
        }
    }

    fn rng_for(&self, facet: Option<&FacetDimensions>, position: u64) -> StdRng {
        let mut hasher = DefaultHasher::new();
        self.kind.slug().hash(&mut hasher);
        facet.hash(&mut hasher);
        position.hash(&mut hasher);
        StdRng::seed_from_u64(self.seed ^ hasher.finish())
    }

    fn synthesize(&self, facet: Option<&FacetDimensions>, position: u64) -> OrderRecord {
        let mut rng = self.rng_for(facet, position);

        // Без фильтра измерения выбираются независимо друг от друга
        let (segment, stage) = match facet {
            Some(dims) => (dims.segment.clone(), dims.stage.clone()),
            None => (
                self.segments.choose(&mut rng).cloned().unwrap_or_default(),
                self.stages.choose(&mut rng).cloned().unwrap_or_default(),
            ),
        };

        let quantity = rng.gen_range(1..=5u32);
        let unit_price = rng.gen_range(50..=3_000i64) * 100;
        let tracking_no = if rng.gen_bool(0.6) {
            Some(format!("{}{:010}", segment_tag(&segment), rng.gen_range(0..10_000_000_000u64)))
        } else {
            None
        };

        OrderRecord {
            order_no: format!(
                "{}-{}-{:06}",
                self.order_prefix,
                stage_tag(&segment, &stage, facet.is_some()),
                position + 1
            ),
            position,
            segment,
            stage,
            member_name: MEMBER_NAMES.choose(&mut rng).copied().unwrap_or_default().to_string(),
            item_name: ITEM_NAMES.choose(&mut rng).copied().unwrap_or_default().to_string(),
            quantity,
            amount_krw: unit_price * quantity as i64,
            tracking_no,
            created_at: Utc::now() - Duration::minutes(rng.gen_range(0..60 * 24 * 30)),
        }
    }
}

fn segment_tag(segment: &str) -> String {
    segment.chars().take(2).collect::<String>().to_uppercase()
}

/// В режиме "все" позиция уникальна сама по себе; в фасете номер
/// дополняется кодом, чтобы номера разных фасетов не совпадали
fn stage_tag(segment: &str, stage: &str, filtered: bool) -> String {
    if filtered {
        format!("{}{}", segment_tag(segment), segment_tag(stage))
    } else {
        "A".to_string()
    }
}

impl PageDataProvider for SynthesizedBoard {
    type Record = OrderRecord;

    fn taxonomy(&self) -> &StatusTaxonomy {
        &self.taxonomy
    }

    fn defaults(&self) -> &BoardDefaults {
        &self.defaults
    }

    fn produce(
        &self,
        facet: Option<&FacetDimensions>,
        slice: PageSlice,
    ) -> Result<Vec<OrderRecord>, BoardError> {
        let end = slice
            .start
            .checked_add(slice.length)
            .ok_or_else(|| BoardError::SourceFailed("page slice overflows".to_string()))?;
        Ok((slice.start..end)
            .map(|position| self.synthesize(facet, position))
            .collect())
    }
}
