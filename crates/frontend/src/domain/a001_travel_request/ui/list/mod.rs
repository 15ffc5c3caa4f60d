use contracts::system::auth::{permissions, PermissionMode};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use super::{details_link_column, folio_column, status_column};
use crate::domain::a001_travel_request::api;
use crate::domain::a001_travel_request::rows::{keys, request_rows};
use crate::layout::app_state::AppState;
use crate::shared::components::data_table::{Column, DataTable, Row};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::auth::session::Session;

const PAGE_SIZE: usize = 10;

fn columns() -> Vec<Column> {
    vec![
        folio_column(),
        Column::new(keys::MOTIVE, "Motivo"),
        Column::new(keys::ROUTE, "Ruta"),
        Column::new(keys::DEPARTURE, "Salida"),
        Column::new(keys::RETURN, "Regreso"),
        status_column(),
        Column::new(keys::ADVANCE, "Anticipo").class("text-right"),
        Column::new(keys::CREATED_AT, "Creada"),
        details_link_column(),
    ]
}

/// Requests created by the signed-in user
#[component]
pub fn MyRequestsPage(session: Session, app: AppState) -> impl IntoView {
    app.set_page_title("Mis solicitudes");

    let rows: RwSignal<Option<Vec<Row>>> = RwSignal::new(None);
    let loading = RwSignal::new(false);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_my_requests(&session.api()).await {
                Ok(requests) => rows.set(Some(request_rows(&requests))),
                Err(err) => {
                    app.report_error(session, "cargar tus solicitudes", &err);
                    rows.set(Some(Vec::new()));
                }
            }
            loading.set(false);
        });
    };
    load();

    let can_create =
        move || session.has_permissions(&[permissions::CREATE_REQUEST], PermissionMode::All);

    view! {
        <PageFrame page_id="a001_travel_request--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("plane")}
                    <h1 class="page__title">"Mis solicitudes"</h1>
                </div>
                <div class="page__header-right">
                    <Show when=can_create>
                        <A href="/requests/new">
                            <span class="link-button link-button--primary">
                                {icon("plus")}
                                " Nueva solicitud"
                            </span>
                        </A>
                    </Show>
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

            <div class="page__content">
                {move || match rows.get() {
                    None => view! { <div class="page-loading"><Spinner /></div> }.into_any(),
                    Some(data) => view! {
                        <DataTable
                            columns=columns()
                            initial_data=data
                            items_per_page=PAGE_SIZE
                            placeholder="-"
                            empty_message="Aún no has registrado solicitudes de viaje."
                            table_id="a001-my-requests-table"
                        />
                    }
                    .into_any(),
                }}
            </div>
        </PageFrame>
    }
}
