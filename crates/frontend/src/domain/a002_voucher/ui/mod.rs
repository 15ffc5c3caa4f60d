pub mod upload;

use leptos::prelude::*;
use serde_json::Value;

use super::rows::keys;
use crate::shared::components::data_table::{CellContext, Column};

fn file_link(label: &'static str) -> impl Fn(CellContext) -> AnyView + Send + Sync + 'static {
    move |ctx: CellContext| match ctx.value.get_untracked() {
        Value::String(url) => view! {
            <a href=url target="_blank" rel="noopener">{label}</a>
        }
        .into_any(),
        _ => view! { <span class="muted">"-"</span> }.into_any(),
    }
}

/// Read-only columns for rows built by `voucher_row`
pub fn voucher_columns() -> Vec<Column> {
    vec![
        Column::new(keys::CLASS, "Tipo"),
        Column::new(keys::AMOUNT, "Monto").class("text-right"),
        Column::new(keys::TAX_TYPE, "Impuesto"),
        Column::new(keys::TAX, "IVA incluido").class("text-right"),
        Column::new(keys::STATUS, "Estado"),
        Column::new(keys::PDF, "PDF").render(file_link("PDF")),
        Column::new(keys::XML, "XML").render(file_link("XML")),
    ]
}
