//! Schema-driven table.
//!
//! One component covers editable forms (append + per-cell renderers),
//! read-only listings (pagination) and master/detail lists (expanded rows):
//!
//! ```rust,ignore
//! let columns = vec![
//!     Column::new("motive", "Motivo"),
//!     Column::new("advance", "Anticipo").class("text-right"),
//!     Column::new("id", "").render(|ctx| view! { <a href=...>"Ver"</a> }.into_any()),
//! ];
//! view! { <DataTable columns=columns initial_data=rows items_per_page=10 /> }
//! ```

pub mod editors;
pub mod model;
mod state;
mod view;

use std::collections::HashSet;

use leptos::prelude::*;
use serde_json::Value;

pub use model::{Pagination, Row, DEFAULT_PLACEHOLDER};
pub use view::DataTable;

/// What a custom cell renderer receives
#[derive(Clone, Copy)]
pub struct CellContext {
    /// Current value of the cell, `Null` when absent
    pub value: Signal<Value>,
    /// Replaces the cell value and reports the new rows to the owner
    pub set: Callback<Value>,
    pub row_index: usize,
}

impl CellContext {
    /// The value as text, `""` for anything that is not a string or number.
    /// Tracks `value` when called inside a reactive closure.
    pub fn text(&self) -> String {
        match self.value.get() {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub header: String,
    pub default_value: Option<Value>,
    pub render_cell: Option<Callback<CellContext, AnyView>>,
    pub class: Option<&'static str>,
}

impl Column {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            default_value: None,
            render_cell: None,
            class: None,
        }
    }

    /// Value of this column in rows created by the append control
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(CellContext) -> AnyView + Send + Sync + 'static,
    {
        self.render_cell = Some(Callback::new(render));
        self
    }

    /// Extra CSS class on every cell of the column
    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }
}

/// Rows whose index is in `expanded` get a full-width detail row below them.
/// Toggling is up to the owner.
#[derive(Clone, Copy)]
pub struct Expansion {
    pub expanded: Signal<HashSet<usize>>,
    pub render_expanded_row: Callback<usize, AnyView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: Value) -> CellContext {
        CellContext {
            value: Signal::stored(value),
            set: Callback::new(|_: Value| {}),
            row_index: 0,
        }
    }

    #[test]
    fn test_cell_text_for_editors() {
        let owner = Owner::new();
        owner.with(|| {
            assert_eq!(context(json!("Puebla")).text(), "Puebla");
            assert_eq!(context(json!(1250.5)).text(), "1250.5");
            assert_eq!(context(Value::Null).text(), "");
            assert_eq!(context(json!(true)).text(), "");
        });
    }
}
