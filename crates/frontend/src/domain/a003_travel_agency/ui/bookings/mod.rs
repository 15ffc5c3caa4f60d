//! Approved trips waiting for an agency to book them.

use contracts::domain::a001_travel_request::{RequestStatus, TravelRequest};
use contracts::domain::a003_travel_agency::{agency_name, TravelAgency};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{json, Value};
use thaw::*;

use crate::domain::a001_travel_request::api::{fetch_all_requests, AllRequestsQuery};
use crate::domain::a001_travel_request::rows::{keys, request_row};
use crate::domain::a001_travel_request::ui::{details_link_column, folio_column};
use crate::domain::a003_travel_agency::api;
use crate::layout::app_state::AppState;
use crate::shared::api::ApiError;
use crate::shared::components::data_table::model::str_cell;
use crate::shared::components::data_table::{Column, DataTable, Row};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::auth::session::Session;

/// Agency id picked in the row, as a string; `""` until chosen
const AGENCY_CHOICE: &str = "agency_choice";
const ASSIGN: &str = "assign";

/// Approved requests with no agency yet
pub fn pending_bookings(requests: Vec<TravelRequest>) -> Vec<TravelRequest> {
    requests
        .into_iter()
        .filter(|r| r.status.awaits_booking() && r.travel_agency_id.is_none())
        .collect()
}

pub fn parse_choice(value: &str) -> Option<i64> {
    value.trim().parse().ok().filter(|id| *id > 0)
}

fn booking_row(request: &TravelRequest) -> Row {
    let mut row = request_row(request);
    row.insert(AGENCY_CHOICE.into(), json!(""));
    row.insert(ASSIGN.into(), json!(request.id));
    row
}

async fn load_bookings(
    session: Session,
) -> Result<(Vec<TravelAgency>, Vec<TravelRequest>), ApiError> {
    let api_client = session.api();
    let agencies = api::fetch_agencies(&api_client).await?;
    let query = AllRequestsQuery {
        status: Some(RequestStatus::Approved),
    };
    let requests = fetch_all_requests(&api_client, &query).await?;
    Ok((agencies, pending_bookings(requests)))
}

#[component]
pub fn BookingsPage(session: Session, app: AppState) -> impl IntoView {
    app.set_page_title("Reservaciones");

    let agencies: RwSignal<Vec<TravelAgency>> = RwSignal::new(Vec::new());
    let requests: RwSignal<Option<Vec<TravelRequest>>> = RwSignal::new(None);
    // mirror of the table, holds the per-row agency choice
    let snapshot: RwSignal<Vec<Row>> = RwSignal::new(Vec::new());
    let busy: RwSignal<Option<i64>> = RwSignal::new(None);

    let load = move || {
        spawn_local(async move {
            match load_bookings(session).await {
                Ok((list, pending)) => {
                    agencies.set(list);
                    snapshot.set(pending.iter().map(booking_row).collect());
                    requests.set(Some(pending));
                }
                Err(err) => {
                    app.report_error(session, "cargar las reservaciones pendientes", &err);
                    requests.set(Some(Vec::new()));
                }
            }
        });
    };
    load();

    let choice_at = move |index: usize| {
        snapshot.with(|rows| rows.get(index).and_then(|r| parse_choice(str_cell(r, AGENCY_CHOICE))))
    };

    let assign = move |request_id: i64, index: usize| {
        let Some(agency_id) = choice_at(index) else {
            app.toasts.error("Selecciona una agencia.");
            return;
        };
        if busy.get_untracked().is_some() {
            return;
        }
        busy.set(Some(request_id));
        spawn_local(async move {
            match api::assign_agency(&session.api(), request_id, agency_id).await {
                Ok(()) => {
                    let name = agencies.with_untracked(|list| agency_name(list, agency_id));
                    app.toasts
                        .success(format!("Solicitud #{} asignada a {}", request_id, name));
                    load();
                }
                Err(err) => app.report_error(session, "asignar la agencia", &err),
            }
            busy.set(None);
        });
    };

    let columns = move || {
        vec![
            folio_column(),
            Column::new(keys::REQUESTER, "Solicitante"),
            Column::new(keys::MOTIVE, "Motivo"),
            Column::new(keys::ROUTE, "Ruta"),
            Column::new(keys::DEPARTURE, "Salida"),
            Column::new(keys::RETURN, "Regreso"),
            Column::new(AGENCY_CHOICE, "Agencia").render(move |ctx| {
                let value = ctx.value;
                let set = ctx.set;
                let current = move || value.get().as_str().unwrap_or_default().to_string();
                view! {
                    <select
                        class="cell-select"
                        prop:value=current
                        on:change=move |ev| set.run(Value::String(event_target_value(&ev)))
                    >
                        <option value="">"Selecciona..."</option>
                        <For
                            each=move || agencies.get()
                            key=|agency| agency.id
                            children=move |agency| {
                                let id = agency.id.to_string();
                                let selected = {
                                    let id = id.clone();
                                    move || current() == id
                                };
                                view! { <option value=id selected=selected>{agency.name}</option> }
                            }
                        />
                    </select>
                }
                .into_any()
            }),
            Column::new(ASSIGN, "").class("table__cell--actions").render(move |ctx| {
                let Some(request_id) = ctx.value.get_untracked().as_i64() else {
                    return ().into_any();
                };
                let index = ctx.row_index;
                view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| assign(request_id, index)
                        disabled=Signal::derive(move || busy.get().is_some() || choice_at(index).is_none())
                        loading=Signal::derive(move || busy.get() == Some(request_id))
                    >
                        {icon("building")}
                        " Asignar"
                    </Button>
                }
                .into_any()
            }),
            details_link_column(),
        ]
    };

    view! {
        <PageFrame page_id="a003_travel_agency--bookings" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("building")}
                    <h1 class="page__title">"Asignar agencia de viajes"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || match requests.get() {
                    None => view! { <div class="page-loading"><Spinner /></div> }.into_any(),
                    Some(list) => view! {
                        <DataTable
                            columns=columns()
                            initial_data={list.iter().map(booking_row).collect::<Vec<_>>()}
                            on_data_change=Callback::new(move |rows: Vec<Row>| snapshot.set(rows))
                            placeholder="-"
                            empty_message="No hay viajes aprobados pendientes de reservar."
                            table_id="a003-bookings-table"
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

    fn request(id: i64, status: RequestStatus, agency: Option<i64>) -> TravelRequest {
        TravelRequest {
            id,
            user_id: None,
            requester_name: None,
            motive: "Capacitación".into(),
            requirements: None,
            priority: Priority::Low,
            status,
            advance_money: 0.0,
            created_at: None,
            updated_at: None,
            approver_id: None,
            travel_agency_id: agency,
            travel_agency_name: None,
            destinations: Vec::new(),
            revisions: Vec::new(),
            vouchers: Vec::new(),
        }
    }

    #[test]
    fn test_pending_bookings() {
        let list = vec![
            request(1, RequestStatus::Approved, None),
            request(2, RequestStatus::Approved, Some(3)),
            request(3, RequestStatus::InProgress, None),
            request(4, RequestStatus::Approved, None),
        ];
        let ids: Vec<i64> = pending_bookings(list).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("7"), Some(7));
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("0"), None);
    }

    #[test]
    fn test_booking_row_starts_unassigned() {
        let row = booking_row(&request(5, RequestStatus::Approved, None));
        assert_eq!(row[AGENCY_CHOICE], json!(""));
        assert_eq!(row[ASSIGN], json!(5));
    }
}
