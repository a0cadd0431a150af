use std::collections::BTreeSet;

/// Выделенные строки для групповых действий.
///
/// Выделение всегда подмножество ключей текущей страницы: ключи вне
/// страницы игнорируются, при смене страницы лишние отбрасываются.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelectionController {
    page_keys: BTreeSet<String>,
    selected: BTreeSet<String>,
}

impl RowSelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ключи только что применённой страницы
    pub fn retain_page<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.page_keys = keys.into_iter().collect();
        let page_keys = &self.page_keys;
        self.selected.retain(|k| page_keys.contains(k));
    }

    pub fn set_selected<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.selected = keys
            .into_iter()
            .filter(|k| self.page_keys.contains(k))
            .collect();
    }

    pub fn toggle(&mut self, key: &str, checked: bool) {
        if checked {
            if self.page_keys.contains(key) {
                self.selected.insert(key.to_string());
            }
        } else {
            self.selected.remove(key);
        }
    }

    pub fn select_all_on_page(&mut self) {
        self.selected = self.page_keys.clone();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn all_selected(&self) -> bool {
        !self.page_keys.is_empty() && self.selected.len() == self.page_keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selection_limited_to_page() {
        let mut rows = RowSelectionController::new();
        rows.retain_page(keys(&["a", "b", "c"]));
        rows.set_selected(keys(&["a", "z"]));
        assert_eq!(rows.keys(), keys(&["a"]));

        rows.toggle("z", true);
        rows.toggle("c", true);
        assert_eq!(rows.keys(), keys(&["a", "c"]));
        rows.toggle("a", false);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_new_page_prunes_selection() {
        let mut rows = RowSelectionController::new();
        rows.retain_page(keys(&["a", "b"]));
        rows.select_all_on_page();
        assert!(rows.all_selected());

        rows.retain_page(keys(&["b", "c"]));
        assert_eq!(rows.keys(), keys(&["b"]));
        assert!(!rows.all_selected());
    }

    #[test]
    fn test_clear_and_empty_page() {
        let mut rows = RowSelectionController::new();
        rows.retain_page(keys(&["a"]));
        rows.toggle("a", true);
        rows.clear();
        assert_eq!(rows.len(), 0);

        rows.retain_page(Vec::new());
        rows.select_all_on_page();
        assert!(!rows.all_selected());
    }
}
