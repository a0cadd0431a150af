//! Выбор активного фасета доски.
//!
//! Состояния: `Unfiltered` (начальное) и `Filtered(code)`. Менять выбор можно
//! только через `select_facet` / `clear_facet`; обе команды возвращают
//! `FacetChange`, по которому доска делает reload-and-reset.

use contracts::shared::status_board::{
    BoardError, FacetSelection, StatusGroup, StatusItem, StatusTaxonomy,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetState {
    Unfiltered,
    Filtered(String),
}

/// Эффект команды: что было и что стало
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetChange {
    pub previous: FacetSelection,
    pub current: FacetSelection,
}

impl FacetChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSelectionController {
    default_label: String,
    selection: FacetSelection,
}

impl FacetSelectionController {
    pub fn new(default_label: impl Into<String>) -> Self {
        let default_label = default_label.into();
        Self {
            selection: FacetSelection::unfiltered(default_label.clone()),
            default_label,
        }
    }

    pub fn select_facet(&mut self, group: &StatusGroup, item: &StatusItem) -> FacetChange {
        self.replace(FacetSelection::for_item(group, item))
    }

    /// Выбор по коду статуса; код должен быть в таксономии
    pub fn select_code(
        &mut self,
        taxonomy: &StatusTaxonomy,
        code: &str,
    ) -> Result<FacetChange, BoardError> {
        let (group, item) = taxonomy
            .find(code)
            .ok_or_else(|| BoardError::UnknownFacet(code.to_string()))?;
        Ok(self.select_facet(group, item))
    }

    pub fn clear_facet(&mut self) -> FacetChange {
        let unfiltered = FacetSelection::unfiltered(self.default_label.clone());
        self.replace(unfiltered)
    }

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    pub fn state(&self) -> FacetState {
        match &self.selection.code {
            Some(code) => FacetState::Filtered(code.clone()),
            None => FacetState::Unfiltered,
        }
    }

    fn replace(&mut self, next: FacetSelection) -> FacetChange {
        let previous = std::mem::replace(&mut self.selection, next);
        FacetChange {
            previous,
            current: self.selection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waiting() -> (StatusGroup, StatusItem) {
        let item = StatusItem::new("USER", "WAITING", "Waiting", 45);
        let group = StatusGroup {
            title: "Individual".into(),
            segment: "USER".into(),
            items: vec![item.clone()],
        };
        (group, item)
    }

    #[test]
    fn test_starts_unfiltered() {
        let c = FacetSelectionController::new("All orders");
        assert_eq!(c.state(), FacetState::Unfiltered);
        assert_eq!(c.selection().label, "All orders");
    }

    #[test]
    fn test_select_then_clear_restores_default() {
        let (group, item) = waiting();
        let mut c = FacetSelectionController::new("All orders");
        let before = c.selection().clone();

        let change = c.select_facet(&group, &item);
        assert!(change.changed());
        assert_eq!(c.state(), FacetState::Filtered("USER_WAITING".into()));
        assert_eq!(c.selection().label, "Individual > Waiting");

        c.clear_facet();
        assert_eq!(c.selection(), &before);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (group, item) = waiting();
        let mut once = FacetSelectionController::new("All orders");
        once.select_facet(&group, &item);
        once.clear_facet();

        let mut twice = once.clone();
        let change = twice.clear_facet();
        assert!(!change.changed());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reselect_switches_filter() {
        let (group, item) = waiting();
        let other = StatusItem::new("USER", "ARRIVED", "Arrived", 3);
        let mut c = FacetSelectionController::new("All orders");
        c.select_facet(&group, &item);
        let change = c.select_facet(&group, &other);
        assert_eq!(change.previous.code.as_deref(), Some("USER_WAITING"));
        assert_eq!(c.state(), FacetState::Filtered("USER_ARRIVED".into()));
    }

    #[test]
    fn test_select_code_unknown_keeps_selection() {
        let (group, _) = waiting();
        let taxonomy = StatusTaxonomy::new(vec![group]).unwrap();
        let mut c = FacetSelectionController::new("All orders");

        let change = c.select_code(&taxonomy, "USER_WAITING").unwrap();
        assert!(change.changed());
        assert_eq!(c.selection().label, "Individual > Waiting");

        assert_eq!(
            c.select_code(&taxonomy, "BIZ_WAITING"),
            Err(BoardError::UnknownFacet("BIZ_WAITING".into()))
        );
        assert_eq!(c.state(), FacetState::Filtered("USER_WAITING".into()));
    }
}
