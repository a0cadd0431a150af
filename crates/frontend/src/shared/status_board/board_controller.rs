//! Контроллер доски: фасет + выделение строк + пагинация + токены запросов.
//!
//! Каждая команда, требующая данных, возвращает `FetchTicket`. Ответ
//! применяется через `apply` только если его токен последний выданный,
//! иначе он молча отбрасывается (пользователь успел сменить фасет/страницу).

use super::facet_controller::{FacetChange, FacetSelectionController, FacetState};
use super::row_selection::RowSelectionController;
use contracts::shared::status_board::{
    total_pages, BoardDefaults, BoardError, FacetSelection, PageRequest, PageRequestError,
    PageResult, StatusTaxonomy,
};

/// Ключ строки для выделения
pub trait RowKey {
    fn row_key(&self) -> String;
}

/// Запрос, который должна выполнить таблица
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub facet: FacetSelection,
    pub request: PageRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone)]
pub struct BoardController<R> {
    taxonomy: StatusTaxonomy,
    defaults: BoardDefaults,
    facet: FacetSelectionController,
    rows: RowSelectionController,
    page: u64,
    page_size: u64,
    records: Vec<R>,
    total: u64,
    next_token: u64,
    pending: Option<u64>,
    error: Option<String>,
}

impl<R: RowKey> BoardController<R> {
    pub fn new(
        taxonomy: StatusTaxonomy,
        defaults: BoardDefaults,
        page_size: u64,
    ) -> Result<Self, PageRequestError> {
        PageRequest::first(page_size)?;
        Ok(Self {
            facet: FacetSelectionController::new(defaults.label.clone()),
            taxonomy,
            defaults,
            rows: RowSelectionController::new(),
            page: 1,
            page_size,
            records: Vec::new(),
            total: 0,
            next_token: 0,
            pending: None,
            error: None,
        })
    }

    // ---------------------------------------------------------------------
    // Команды
    // ---------------------------------------------------------------------

    /// Выбор плитки по коду статуса
    pub fn select_code(&mut self, code: &str) -> Result<FetchTicket, BoardError> {
        let change = self.facet.select_code(&self.taxonomy, code)?;
        Ok(self.reload_and_reset(change))
    }

    /// Выбор плитки по позиции в таксономии
    pub fn select_facet(&mut self, group_idx: usize, item_idx: usize) -> Option<FetchTicket> {
        let (group, item) = self.taxonomy.get(group_idx, item_idx)?;
        let change = self.facet.select_facet(group, item);
        Some(self.reload_and_reset(change))
    }

    pub fn clear_facet(&mut self) -> FetchTicket {
        let change = self.facet.clear_facet();
        self.reload_and_reset(change)
    }

    pub fn change_page(&mut self, page: u64) -> Result<FetchTicket, PageRequestError> {
        let request = PageRequest::new(page, self.page_size)?;
        self.page = request.page;
        Ok(self.issue())
    }

    pub fn change_page_size(&mut self, page_size: u64) -> Result<FetchTicket, PageRequestError> {
        let request = PageRequest::first(page_size)?;
        self.page = request.page;
        self.page_size = request.page_size;
        Ok(self.issue())
    }

    /// Повтор текущего запроса (первая загрузка, "Обновить", повтор после ошибки)
    pub fn reload(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Применение ответа на запрос с токеном `token`
    pub fn apply(&mut self, token: u64, result: Result<PageResult<R>, String>) -> ApplyOutcome {
        if self.pending != Some(token) {
            return ApplyOutcome::Stale;
        }
        self.pending = None;
        match result {
            Ok(page) => {
                self.rows.retain_page(page.records.iter().map(|r| r.row_key()));
                self.records = page.records;
                self.total = page.total;
                self.error = None;
                ApplyOutcome::Applied
            }
            Err(e) => {
                // Фасет и страница уже переключены, старые строки к ним не относятся
                self.rows.retain_page(Vec::new());
                self.records.clear();
                self.total = 0;
                self.error = Some(e);
                ApplyOutcome::Failed
            }
        }
    }

    pub fn toggle_row(&mut self, key: &str, checked: bool) {
        self.rows.toggle(key, checked);
    }

    pub fn toggle_all(&mut self, checked: bool) {
        if checked {
            self.rows.select_all_on_page();
        } else {
            self.rows.clear();
        }
    }

    pub fn set_selected<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.rows.set_selected(keys);
    }

    // ---------------------------------------------------------------------
    // Запросы (без побочных эффектов)
    // ---------------------------------------------------------------------

    pub fn taxonomy(&self) -> &StatusTaxonomy {
        &self.taxonomy
    }

    pub fn defaults(&self) -> &BoardDefaults {
        &self.defaults
    }

    pub fn selection(&self) -> &FacetSelection {
        self.facet.selection()
    }

    pub fn facet_state(&self) -> FacetState {
        self.facet.state()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.page_size)
    }

    pub fn rows(&self) -> &RowSelectionController {
        &self.rows
    }

    pub fn selected_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.rows.contains(key)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    // ---------------------------------------------------------------------

    fn reload_and_reset(&mut self, change: FacetChange) -> FetchTicket {
        if change.changed() {
            log::debug!(
                "Facet changed: {:?} -> {:?}",
                change.previous.code,
                change.current.code
            );
        }
        self.rows.clear();
        self.page = 1;
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.next_token += 1;
        self.pending = Some(self.next_token);
        FetchTicket {
            token: self.next_token,
            facet: self.facet.selection().clone(),
            request: PageRequest {
                page: self.page,
                page_size: self.page_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::status_board::{slice, StatusGroup, StatusItem};

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u64);

    impl RowKey for Row {
        fn row_key(&self) -> String {
            format!("R{}", self.0)
        }
    }

    fn taxonomy() -> StatusTaxonomy {
        StatusTaxonomy::new(vec![
            StatusGroup {
                title: "Individual".into(),
                segment: "USER".into(),
                items: vec![
                    StatusItem::new("USER", "WAITING", "Waiting", 45),
                    StatusItem::new("USER", "ARRIVED", "Arrived", 110),
                ],
            },
            StatusGroup {
                title: "Business".into(),
                segment: "BIZ".into(),
                items: vec![StatusItem::new("BIZ", "WAITING", "Waiting", 177)],
            },
        ])
        .unwrap()
    }

    fn controller() -> BoardController<Row> {
        BoardController::new(
            taxonomy(),
            BoardDefaults {
                label: "All orders".into(),
                total: 332,
            },
            50,
        )
        .unwrap()
    }

    /// Ответ "бэкенда" на билет
    fn serve(c: &BoardController<Row>, ticket: &FetchTicket) -> PageResult<Row> {
        let total = match &ticket.facet.code {
            Some(code) => c.taxonomy().find(code).unwrap().1.count,
            None => c.defaults().total,
        };
        let s = slice(ticket.request, total).unwrap();
        PageResult {
            records: (s.start..s.start + s.length).map(Row).collect(),
            total,
        }
    }

    fn load(c: &mut BoardController<Row>, ticket: FetchTicket) -> ApplyOutcome {
        let page = serve(c, &ticket);
        c.apply(ticket.token, Ok(page))
    }

    #[test]
    fn test_rejects_empty_page_size() {
        let r = BoardController::<Row>::new(
            taxonomy(),
            BoardDefaults {
                label: "All".into(),
                total: 0,
            },
            0,
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_facet_page_equals_item_count() {
        let mut c = controller();
        let ticket = c.select_code("USER_WAITING").unwrap();
        assert_eq!(ticket.request, PageRequest { page: 1, page_size: 50 });
        assert_eq!(load(&mut c, ticket), ApplyOutcome::Applied);
        assert_eq!(c.records().len(), 45);
        assert_eq!(c.total(), 45);
        assert_eq!(c.selection().label, "Individual > Waiting");
    }

    #[test]
    fn test_unfiltered_paging() {
        let mut c = controller();
        let t = c.reload();
        load(&mut c, t);
        assert_eq!(c.total(), 332);
        assert_eq!(c.total_pages(), 7);

        let t = c.change_page(2).unwrap();
        load(&mut c, t);
        assert_eq!(c.records().first(), Some(&Row(50)));
        assert_eq!(c.records().len(), 50);

        let t = c.change_page(7).unwrap();
        load(&mut c, t);
        assert_eq!(c.records().len(), 32);

        let t = c.change_page(10).unwrap();
        assert_eq!(load(&mut c, t), ApplyOutcome::Applied);
        assert!(c.records().is_empty());
        assert!(c.change_page(0).is_err());
    }

    #[test]
    fn test_facet_change_clears_rows_before_fetch_resolves() {
        let mut c = controller();
        let t = c.reload();
        load(&mut c, t);
        c.toggle_row("R1", true);
        c.toggle_row("R2", true);
        assert_eq!(c.selected_count(), 2);

        let t = c.change_page(2).unwrap();
        assert_eq!(c.selected_count(), 2);
        load(&mut c, t);
        assert_eq!(c.selected_count(), 0);

        c.toggle_all(true);
        assert_eq!(c.selected_count(), 50);
        let pending = c.select_code("BIZ_WAITING").unwrap();
        assert_eq!(c.selected_count(), 0);
        assert_eq!(c.page(), 1);
        assert!(c.is_loading());
        load(&mut c, pending);

        c.toggle_all(true);
        c.clear_facet();
        assert_eq!(c.selected_count(), 0);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut c = controller();
        let first = c.select_code("USER_WAITING").unwrap();
        let second = c.select_code("BIZ_WAITING").unwrap();
        assert!(second.token > first.token);

        let late = serve(&c, &first);
        assert_eq!(c.apply(first.token, Ok(late)), ApplyOutcome::Stale);
        assert!(c.records().is_empty());
        assert!(c.is_loading());

        assert_eq!(load(&mut c, second), ApplyOutcome::Applied);
        assert_eq!(c.total(), 177);

        // повторный ответ на уже применённый билет тоже устарел
        assert_eq!(
            c.apply(2, Ok(PageResult { records: vec![], total: 0 })),
            ApplyOutcome::Stale
        );
        assert_eq!(c.total(), 177);
    }

    #[test]
    fn test_failed_facet_switch_drops_unfiltered_rows() {
        let mut c = controller();
        let t = c.reload();
        load(&mut c, t);
        assert_eq!(c.total(), 332);

        let t = c.select_code("USER_WAITING").unwrap();
        assert_eq!(c.apply(t.token, Err("timeout".into())), ApplyOutcome::Failed);
        assert_eq!(c.error(), Some("timeout"));
        assert_eq!(c.selection().code.as_deref(), Some("USER_WAITING"));
        assert_eq!(c.total(), 0);
        assert!(c.records().is_empty());

        c.toggle_all(true);
        assert_eq!(c.selected_count(), 0);
    }

    #[test]
    fn test_failed_page_change_drops_previous_page() {
        let mut c = controller();
        let t = c.select_code("USER_WAITING").unwrap();
        load(&mut c, t);
        c.toggle_row("R3", true);

        let t = c.change_page(3).unwrap();
        assert_eq!(
            c.apply(t.token, Err("HTTP error: 502".into())),
            ApplyOutcome::Failed
        );
        assert_eq!(c.page(), 3);
        assert_eq!(c.records().first(), None);
        assert!(!c.is_selected("R3"));
        assert_eq!(c.total_pages(), 0);
    }

    #[test]
    fn test_failure_ends_loading_and_allows_retry() {
        let mut c = controller();
        let t = c.select_code("USER_WAITING").unwrap();
        assert!(c.is_loading());
        assert_eq!(
            c.apply(t.token, Err("Request timed out".into())),
            ApplyOutcome::Failed
        );
        assert!(!c.is_loading());

        let retry = c.reload();
        assert!(retry.token > t.token);
        assert_eq!(retry.facet.code.as_deref(), Some("USER_WAITING"));
        assert!(c.is_loading());
        assert_eq!(load(&mut c, retry), ApplyOutcome::Applied);
        assert_eq!(c.error(), None);
        assert_eq!(c.total(), 45);
        assert_eq!(c.records().len(), 45);
    }

    #[test]
    fn test_select_then_clear_restores_defaults() {
        let mut c = controller();
        let t = c.reload();
        load(&mut c, t);
        let label = c.selection().label.clone();
        let total = c.total();

        let t = c.select_facet(1, 0).unwrap();
        load(&mut c, t);
        assert_eq!(c.total(), 177);

        let t = c.clear_facet();
        load(&mut c, t);
        assert_eq!(c.selection().label, label);
        assert_eq!(c.total(), total);
        assert_eq!(c.facet_state(), FacetState::Unfiltered);
        assert!(c.select_facet(5, 0).is_none());
    }

    #[test]
    fn test_unknown_code_leaves_state_untouched() {
        let mut c = controller();
        let t = c.reload();
        load(&mut c, t);
        c.toggle_row("R0", true);
        assert_eq!(
            c.select_code("NOPE"),
            Err(BoardError::UnknownFacet("NOPE".into()))
        );
        assert_eq!(c.selected_count(), 1);
        assert!(!c.is_loading());
    }

    #[test]
    fn test_set_selected_ignores_rows_off_page() {
        let mut c = controller();
        let t = c.reload();
        load(&mut c, t);
        c.set_selected(vec!["R1".to_string(), "R4".to_string(), "R400".to_string()]);
        assert_eq!(c.rows().keys(), vec!["R1".to_string(), "R4".to_string()]);
        assert!(!c.rows().all_selected());
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut c = controller();
        c.change_page(3).unwrap();
        let t = c.change_page_size(100).unwrap();
        assert_eq!(t.request, PageRequest { page: 1, page_size: 100 });
        assert!(c.change_page_size(0).is_err());
        assert_eq!(c.page_size(), 100);
    }

    #[test]
    fn test_every_item_page_matches_count() {
        let mut c = controller();
        let codes: Vec<(String, u64)> = c
            .taxonomy()
            .groups()
            .iter()
            .flat_map(|g| g.items.iter().map(|i| (i.code.clone(), i.count)))
            .collect();
        for (code, count) in codes {
            c.change_page_size(count.max(1)).unwrap();
            let t = c.select_code(&code).unwrap();
            load(&mut c, t);
            assert_eq!(c.records().len() as u64, count);
            assert_eq!(c.total(), count);
        }
    }
}
