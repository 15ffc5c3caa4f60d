//! Every request the user may see, with status and text filters.

use contracts::domain::a001_travel_request::{RequestStatus, TravelRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thaw::*;

use super::{details_link_column, folio_column, status_column};
use crate::domain::a001_travel_request::api::{self, AllRequestsQuery};
use crate::domain::a001_travel_request::rows::{keys, request_rows, status_of, status_value};
use crate::layout::app_state::AppState;
use crate::shared::components::data_table::{Column, DataTable};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::auth::session::Session;

const PAGE_SIZE: usize = 10;

/// API code of a status, as used by the filter select
pub fn status_code(status: RequestStatus) -> String {
    match status_value(status) {
        Value::String(code) => code,
        _ => String::new(),
    }
}

/// `""` selects every status
pub fn parse_status_filter(code: &str) -> Option<RequestStatus> {
    if code.is_empty() {
        return None;
    }
    Some(status_of(&Value::String(code.to_string()))).filter(|s| *s != RequestStatus::Unknown)
}

/// Client-side pass over the list; the server may ignore the status query
pub fn filter_requests(
    requests: &[TravelRequest],
    status: Option<RequestStatus>,
    search: &str,
) -> Vec<TravelRequest> {
    let needle = search.trim().to_lowercase();
    requests
        .iter()
        .filter(|r| status.map_or(true, |s| r.status == s))
        .filter(|r| {
            needle.is_empty()
                || r.motive.to_lowercase().contains(&needle)
                || r.id.to_string() == needle.trim_start_matches('#')
                || r.requester_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
                || r.route_summary().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

fn columns() -> Vec<Column> {
    vec![
        folio_column(),
        Column::new(keys::REQUESTER, "Solicitante"),
        Column::new(keys::MOTIVE, "Motivo"),
        Column::new(keys::ROUTE, "Ruta"),
        Column::new(keys::DEPARTURE, "Salida"),
        status_column(),
        Column::new(keys::AGENCY, "Agencia"),
        Column::new(keys::ADVANCE, "Anticipo").class("text-right"),
        Column::new(keys::CREATED_AT, "Creada"),
        details_link_column(),
    ]
}

#[component]
pub fn HistoryPage(session: Session, app: AppState) -> impl IntoView {
    app.set_page_title("Historial");

    let requests: RwSignal<Option<Vec<TravelRequest>>> = RwSignal::new(None);
    let status_filter = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    // the table remounts on every filter change; the chosen size stays
    let page_size = RwSignal::new(PAGE_SIZE);

    let load = move || {
        let query = AllRequestsQuery {
            status: parse_status_filter(&status_filter.get_untracked()),
        };
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all_requests(&session.api(), &query).await {
                Ok(list) => requests.set(Some(list)),
                Err(err) => {
                    app.report_error(session, "cargar el historial", &err);
                    requests.set(Some(Vec::new()));
                }
            }
            loading.set(false);
        });
    };
    load();

    // a new status goes back to the server
    Effect::watch(
        move || status_filter.get(),
        move |_, _, _| load(),
        false,
    );

    let visible = Memo::new(move |_| {
        requests.with(|list| {
            list.as_ref().map(|l| {
                filter_requests(l, parse_status_filter(&status_filter.get()), &search.get())
            })
        })
    });

    view! {
        <PageFrame page_id="a001_travel_request--history" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("history")}
                    <h1 class="page__title">"Historial de solicitudes"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <div class="filter-panel__field">
                    <Label>"Estado"</Label>
                    <Select value=status_filter>
                        <option value="">"Todos"</option>
                        {RequestStatus::ALL
                            .iter()
                            .map(|s| view! { <option value=status_code(*s)>{s.label()}</option> })
                            .collect_view()}
                    </Select>
                </div>
                <div class="filter-panel__field">
                    <Label>"Buscar"</Label>
                    <Input value=search placeholder="Folio, motivo, solicitante o ciudad" />
                </div>
            </div>

            <div class="page__content">
                {move || match visible.get() {
                    None => view! { <div class="page-loading"><Spinner /></div> }.into_any(),
                    Some(list) => view! {
                        <DataTable
                            columns=columns()
                            initial_data=request_rows(&list)
                            items_per_page=PAGE_SIZE
                            page_size=page_size
                            placeholder="-"
                            empty_message="No hay solicitudes con estos filtros."
                            table_id="a001-history-table"
                        />
                    }
                    .into_any(),
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_travel_request::Priority;

    fn request(id: i64, motive: &str, status: RequestStatus) -> TravelRequest {
        TravelRequest {
            id,
            user_id: Some(1),
            requester_name: Some("Ana López".into()),
            motive: motive.into(),
            requirements: None,
            priority: Priority::Medium,
            status,
            advance_money: 0.0,
            created_at: None,
            updated_at: None,
            approver_id: None,
            travel_agency_id: None,
            travel_agency_name: None,
            destinations: Vec::new(),
            revisions: Vec::new(),
            vouchers: Vec::new(),
        }
    }

    #[test]
    fn test_status_filter_codes() {
        assert_eq!(status_code(RequestStatus::PendingReview), "pending_review");
        assert_eq!(parse_status_filter(""), None);
        assert_eq!(parse_status_filter("approved"), Some(RequestStatus::Approved));
        assert_eq!(parse_status_filter("bogus"), None);
    }

    #[test]
    fn test_filter_requests() {
        let list = vec![
            request(1, "Congreso en Monterrey", RequestStatus::Approved),
            request(2, "Visita a cliente", RequestStatus::Denied),
            request(3, "Auditoría", RequestStatus::Approved),
        ];
        assert_eq!(filter_requests(&list, None, "").len(), 3);
        assert_eq!(filter_requests(&list, Some(RequestStatus::Approved), "").len(), 2);

        let found = filter_requests(&list, Some(RequestStatus::Approved), "congreso");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        assert_eq!(filter_requests(&list, None, "#2")[0].id, 2);
        assert_eq!(filter_requests(&list, None, "lópez").len(), 3);
    }
}
