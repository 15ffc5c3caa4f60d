//! Row/column bookkeeping behind `DataTable`. No signals here, so every rule
//! is testable without a browser.

use std::ops::Range;

use serde_json::{Map, Value};

use super::Column;
use crate::shared::format::parse_amount;

/// Open record keyed by column key. Keys unknown to the schema are kept.
pub type Row = Map<String, Value>;

/// Placeholder shown for absent or `null` cells unless the table overrides it
pub const DEFAULT_PLACEHOLDER: &str = "N/A";

/// Row built from each column's default value (`""` when none is set)
pub fn new_row(columns: &[Column]) -> Row {
    columns
        .iter()
        .map(|col| {
            let value = col
                .default_value
                .clone()
                .unwrap_or_else(|| Value::String(String::new()));
            (col.key.clone(), value)
        })
        .collect()
}

pub fn append_row(rows: &mut Vec<Row>, columns: &[Column]) {
    rows.push(new_row(columns));
}

/// Replace `key` in row `index`, leaving every other key and row alone.
/// Returns `false` when the index is out of range.
pub fn set_cell(rows: &mut [Row], index: usize, key: &str, value: Value) -> bool {
    match rows.get_mut(index) {
        Some(row) => {
            row.insert(key.to_string(), value);
            true
        }
        None => false,
    }
}

pub fn cell_value(rows: &[Row], index: usize, key: &str) -> Value {
    rows.get(index)
        .and_then(|row| row.get(key))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Display text of a raw cell value
pub fn cell_text(value: &Value, placeholder: &str) -> String {
    match value {
        Value::Null => placeholder.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "Sí".to_string(),
        Value::Bool(false) => "No".to_string(),
        other => other.to_string(),
    }
}

/// Read a string cell, treating anything else as empty
pub fn str_cell<'a>(row: &'a Row, key: &str) -> &'a str {
    row.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Read a boolean cell; strings `"true"`/`"false"` from form inputs are accepted
pub fn bool_cell(row: &Row, key: &str) -> bool {
    match row.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Read a numeric cell; numeric strings from inputs are parsed, junk becomes `NaN`
pub fn number_cell(row: &Row, key: &str) -> f64 {
    match row.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_amount(s),
        _ => 0.0,
    }
}

/// Page arithmetic. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub items_per_page: usize,
}

impl Pagination {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
        }
    }

    /// `ceil(total / items_per_page)`, never less than 1
    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.items_per_page).max(1)
    }

    pub fn clamp_page(&self, page: usize, total_rows: usize) -> usize {
        page.clamp(1, self.total_pages(total_rows))
    }

    /// Row indices shown on `page` (clamped first)
    pub fn page_range(&self, page: usize, total_rows: usize) -> Range<usize> {
        let page = self.clamp_page(page, total_rows);
        let start = ((page - 1) * self.items_per_page).min(total_rows);
        let end = (start + self.items_per_page).min(total_rows);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Vec<Column> {
        vec![
            Column::new("origin_city", "Origen"),
            Column::new("destination_city", "Destino").default_value("CDMX"),
            Column::new("is_hotel_required", "Hotel").default_value(false),
        ]
    }

    #[test]
    fn test_new_row_uses_defaults_or_empty_string() {
        let row = new_row(&schema());
        assert_eq!(row.len(), 3);
        assert_eq!(row["origin_city"], json!(""));
        assert_eq!(row["destination_city"], json!("CDMX"));
        assert_eq!(row["is_hotel_required"], json!(false));
    }

    #[test]
    fn test_append_n_rows() {
        let columns = schema();
        let mut rows = vec![Row::new(), Row::new()];
        for _ in 0..4 {
            append_row(&mut rows, &columns);
        }
        assert_eq!(rows.len(), 6);
        for row in &rows[2..] {
            assert_eq!(row.len(), columns.len());
            assert_eq!(row, &new_row(&columns));
        }
    }

    #[test]
    fn test_set_cell_touches_only_target() {
        let columns = schema();
        let mut rows = Vec::new();
        for _ in 0..3 {
            append_row(&mut rows, &columns);
        }
        rows[1].insert("extra".into(), json!(42));
        let before = rows.clone();

        assert!(set_cell(&mut rows, 1, "origin_city", json!("Monterrey")));

        assert_eq!(rows[0], before[0]);
        assert_eq!(rows[2], before[2]);
        assert_eq!(rows[1]["origin_city"], json!("Monterrey"));
        assert_eq!(rows[1]["destination_city"], before[1]["destination_city"]);
        assert_eq!(rows[1]["extra"], json!(42));
        assert_eq!(rows[1].len(), before[1].len());
    }

    #[test]
    fn test_set_cell_out_of_range() {
        let mut rows: Vec<Row> = Vec::new();
        assert!(!set_cell(&mut rows, 0, "k", json!(1)));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_cell_text_and_placeholder() {
        assert_eq!(cell_text(&Value::Null, DEFAULT_PLACEHOLDER), "N/A");
        assert_eq!(cell_text(&Value::Null, ""), "");
        assert_eq!(cell_text(&json!("Hola"), "N/A"), "Hola");
        assert_eq!(cell_text(&json!(12.5), "N/A"), "12.5");
        assert_eq!(cell_text(&json!(true), "N/A"), "Sí");

        let rows = vec![new_row(&schema())];
        assert_eq!(cell_value(&rows, 0, "missing"), Value::Null);
        assert_eq!(cell_value(&rows, 5, "origin_city"), Value::Null);
    }

    #[test]
    fn test_typed_cell_readers() {
        let row: Row = serde_json::from_value(json!({
            "amount": "1,250.50",
            "bad": "abc",
            "empty": "",
            "n": 3,
            "flag": "true",
            "name": "Ana"
        }))
        .unwrap();
        assert_eq!(number_cell(&row, "amount"), 1250.5);
        assert!(number_cell(&row, "bad").is_nan());
        assert_eq!(number_cell(&row, "empty"), 0.0);
        assert_eq!(number_cell(&row, "n"), 3.0);
        assert!(bool_cell(&row, "flag"));
        assert!(!bool_cell(&row, "name"));
        assert_eq!(str_cell(&row, "name"), "Ana");
        assert_eq!(str_cell(&row, "n"), "");
    }

    #[test]
    fn test_pagination_bounds() {
        let p = Pagination::new(5);
        assert_eq!(p.total_pages(12), 3);
        assert_eq!(p.clamp_page(0, 12), 1);
        assert_eq!(p.clamp_page(4, 12), 3);
        assert_eq!(p.page_range(3, 12), 10..12);
        assert_eq!(p.page_range(1, 12), 0..5);
    }

    #[test]
    fn test_pagination_empty_and_zero_size() {
        let p = Pagination::new(5);
        assert_eq!(p.total_pages(0), 1);
        assert_eq!(p.page_range(2, 0), 0..0);

        let p = Pagination::new(0);
        assert_eq!(p.items_per_page, 1);
        assert_eq!(p.total_pages(3), 3);
    }
}
