pub mod approvals;
pub mod details;
pub mod form;
pub mod history;
pub mod list;
pub mod refunds;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use serde_json::Value;

use super::rows::{keys, leg_keys, status_of};
use crate::shared::components::data_table::Column;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::icons::icon;

/// `:id` segment of the current route
pub fn use_request_id() -> Memo<Option<i64>> {
    let params = use_params_map();
    Memo::new(move |_| params.read().get("id").as_deref().and_then(parse_id))
}

pub fn parse_id(segment: &str) -> Option<i64> {
    segment.trim().parse().ok().filter(|id| *id > 0)
}

/// Status code cell rendered as a badge
pub fn status_column() -> Column {
    Column::new(keys::STATUS, "Estado").render(|ctx| {
        let status = Signal::derive(move || status_of(&ctx.value.get()));
        view! { <StatusBadge status=status /> }.into_any()
    })
}

/// Link to `/requests/{id}`; the `actions` cell holds the id
pub fn details_link_column() -> Column {
    Column::new(keys::ACTIONS, "").class("table__cell--actions").render(|ctx| {
        match ctx.value.get_untracked().as_i64() {
            Some(id) => view! {
                <A href=format!("/requests/{}", id)>
                    <span class="link-button">{icon("eye")} " Ver"</span>
                </A>
            }
            .into_any(),
            None => ().into_any(),
        }
    })
}

pub fn folio_column() -> Column {
    Column::new(keys::ID, "Folio").render(|ctx| {
        let text = match ctx.value.get_untracked() {
            Value::Number(n) => format!("#{}", n),
            _ => String::new(),
        };
        view! { <span class="folio">{text}</span> }.into_any()
    })
}

/// Read-only columns of the destinations table
pub fn destination_columns() -> Vec<Column> {
    vec![
        Column::new(leg_keys::ORIGIN, "Origen"),
        Column::new(leg_keys::DESTINATION, "Destino"),
        Column::new(leg_keys::DEPARTURE, "Salida"),
        Column::new(leg_keys::RETURN, "Regreso"),
        Column::new(leg_keys::STAY_DAYS, "Noches").class("text-right"),
        Column::new(leg_keys::HOTEL, "Hotel"),
        Column::new(leg_keys::PLANE, "Avión"),
        Column::new(leg_keys::DETAILS, "Detalles"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("17"), Some(17));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
        assert_eq!(parse_id("new"), None);
    }
}
