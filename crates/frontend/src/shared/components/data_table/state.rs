//! Reactive half of `DataTable`: the rows, the current page and the change
//! callback. Kept apart from the view so edits and appends run natively.

use leptos::prelude::*;
use serde_json::Value;

use super::model::{self, Pagination, Row};
use super::Column;

#[derive(Clone, Copy)]
pub struct TableState {
    pub columns: StoredValue<Vec<Column>>,
    pub rows: RwSignal<Vec<Row>>,
    /// 1-based, clamped by the view when rows shrink
    pub page: RwSignal<usize>,
    pub per_page: RwSignal<usize>,
    paginated: bool,
    on_change: Option<Callback<Vec<Row>>>,
}

impl TableState {
    pub fn new(
        columns: Vec<Column>,
        rows: Vec<Row>,
        items_per_page: Option<usize>,
        on_change: Option<Callback<Vec<Row>>>,
    ) -> Self {
        Self {
            columns: StoredValue::new(columns),
            rows: RwSignal::new(rows),
            page: RwSignal::new(1),
            per_page: RwSignal::new(items_per_page.unwrap_or(usize::MAX).max(1)),
            paginated: items_per_page.is_some(),
            on_change,
        }
    }

    /// Reads and writes the page size through `per_page`, so it outlives
    /// remounts of the table
    pub fn with_page_size(mut self, per_page: RwSignal<usize>) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn is_paginated(&self) -> bool {
        self.paginated
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.per_page.get())
    }

    fn notify(&self) {
        if let Some(on_change) = self.on_change {
            on_change.run(self.rows.get_untracked());
        }
    }

    /// Writes one cell and reports the full row sequence. Out-of-range
    /// indices change nothing and report nothing.
    pub fn set_cell(&self, index: usize, key: &str, value: Value) -> bool {
        let mut changed = false;
        self.rows
            .update(|rows| changed = model::set_cell(rows, index, key, value));
        if changed {
            self.notify();
        }
        changed
    }

    /// Adds a row of column defaults; a paginated table jumps to its last page
    pub fn append(&self) {
        self.columns
            .with_value(|cols| self.rows.update(|rows| model::append_row(rows, cols)));
        if self.paginated {
            let total = self.rows.with_untracked(Vec::len);
            self.page
                .set(Pagination::new(self.per_page.get_untracked()).total_pages(total));
        }
        self.notify();
    }

    pub fn set_page_size(&self, size: usize) {
        self.per_page.set(size.max(1));
        self.page.set(1);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use serde_json::json;

    type Seen = Arc<Mutex<Vec<Vec<Row>>>>;

    fn recorder() -> (Seen, Callback<Vec<Row>>) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback = Callback::new(move |rows: Vec<Row>| sink.lock().unwrap().push(rows));
        (seen, callback)
    }

    fn schema() -> Vec<Column> {
        vec![
            Column::new("origin_city", "Origen"),
            Column::new("destination_city", "Destino").default_value("CDMX"),
        ]
    }

    fn rows(n: usize) -> Vec<Row> {
        let columns = schema();
        (0..n).map(|_| model::new_row(&columns)).collect()
    }

    #[test]
    fn test_set_cell_reports_whole_sequence() {
        let owner = Owner::new();
        owner.with(|| {
            let (seen, callback) = recorder();
            let state = TableState::new(schema(), rows(3), None, Some(callback));

            assert!(state.set_cell(1, "origin_city", json!("Monterrey")));

            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 1);
            assert_eq!(seen[0].len(), 3);
            assert_eq!(seen[0][1]["origin_city"], json!("Monterrey"));
            assert_eq!(seen[0][0]["origin_city"], json!(""));
            assert_eq!(seen[0], state.rows.get_untracked());
        });
    }

    #[test]
    fn test_out_of_range_set_is_silent() {
        let owner = Owner::new();
        owner.with(|| {
            let (seen, callback) = recorder();
            let state = TableState::new(schema(), rows(2), None, Some(callback));

            assert!(!state.set_cell(5, "origin_city", json!("Monterrey")));

            assert!(seen.lock().unwrap().is_empty());
            assert_eq!(state.rows.get_untracked(), rows(2));
        });
    }

    #[test]
    fn test_append_reports_and_moves_to_last_page() {
        let owner = Owner::new();
        owner.with(|| {
            let (seen, callback) = recorder();
            let state = TableState::new(schema(), rows(4), Some(2), Some(callback));
            assert_eq!(state.page.get_untracked(), 1);

            state.append();

            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 1);
            assert_eq!(seen[0].len(), 5);
            assert_eq!(seen[0][4]["destination_city"], json!("CDMX"));
            let total_pages = Pagination::new(2).total_pages(5);
            assert_eq!(total_pages, 3);
            assert_eq!(state.page.get_untracked(), total_pages);
        });
    }

    #[test]
    fn test_unpaginated_append_keeps_first_page() {
        let owner = Owner::new();
        owner.with(|| {
            let state = TableState::new(schema(), rows(1), None, None);
            state.append();
            assert_eq!(state.rows.with_untracked(Vec::len), 2);
            assert_eq!(state.page.get_untracked(), 1);
            assert!(!state.is_paginated());
        });
    }

    #[test]
    fn test_shared_page_size_survives_new_state() {
        let owner = Owner::new();
        owner.with(|| {
            let size = RwSignal::new(10usize);
            let first = TableState::new(schema(), rows(30), Some(10), None).with_page_size(size);
            first.set_page_size(25);

            let second = TableState::new(schema(), rows(30), Some(10), None).with_page_size(size);
            assert_eq!(second.per_page.get_untracked(), 25);
            assert_eq!(second.page.get_untracked(), 1);
        });
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let owner = Owner::new();
        owner.with(|| {
            let state = TableState::new(schema(), rows(9), Some(2), None);
            state.page.set(4);
            state.set_page_size(0);
            assert_eq!(state.per_page.get_untracked(), 1);
            assert_eq!(state.page.get_untracked(), 1);
        });
    }
}
