//! Stock cell renderers for editable tables.
//!
//! Each returns a closure for [`Column::render`](super::Column::render). The
//! optional `error` callback maps a row index to the message shown under the
//! input; it is evaluated reactively.

use leptos::prelude::*;
use serde_json::Value;

use super::CellContext;

pub type CellError = Callback<usize, Option<String>>;

fn error_line(error: Option<CellError>, row_index: usize) -> impl IntoView {
    move || {
        error
            .and_then(|e| e.run(row_index))
            .map(|message| view! { <div class="cell-error">{message}</div> })
    }
}

/// `<input>` of the given type (`text`, `date`, `number`...) holding a string
pub fn input_editor(
    input_type: &'static str,
    error: Option<CellError>,
) -> impl Fn(CellContext) -> AnyView + Send + Sync + 'static {
    move |ctx: CellContext| {
        let text = move || ctx.text();
        let CellContext { set, row_index, .. } = ctx;
        view! {
            <div class="cell-editor">
                <input
                    type=input_type
                    class="cell-input"
                    class:cell-input--invalid=move || error.and_then(|e| e.run(row_index)).is_some()
                    prop:value=text
                    on:input=move |ev| set.run(Value::String(event_target_value(&ev)))
                />
                {error_line(error, row_index)}
            </div>
        }
        .into_any()
    }
}

pub fn checkbox_editor() -> impl Fn(CellContext) -> AnyView + Send + Sync + 'static {
    |ctx: CellContext| {
        let CellContext { value, set, .. } = ctx;
        let checked = move || match value.get() {
            Value::Bool(b) => b,
            Value::String(s) => s == "true",
            _ => false,
        };
        view! {
            <input
                type="checkbox"
                class="cell-checkbox"
                prop:checked=checked
                on:change=move |ev| set.run(Value::Bool(event_target_checked(&ev)))
            />
        }
        .into_any()
    }
}

/// `<select>` over `(code, label)` pairs; the cell holds the code
pub fn select_editor(
    options: Vec<(&'static str, &'static str)>,
) -> impl Fn(CellContext) -> AnyView + Send + Sync + 'static {
    move |ctx: CellContext| {
        let CellContext { value, set, .. } = ctx;
        let current = move || value.get().as_str().unwrap_or_default().to_string();
        view! {
            <select
                class="cell-select"
                prop:value=current
                on:change=move |ev| set.run(Value::String(event_target_value(&ev)))
            >
                {options
                    .iter()
                    .map(|&(code, label)| {
                        view! {
                            <option value=code selected=move || current() == code>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any()
    }
}
