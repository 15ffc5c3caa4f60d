//! Requests waiting for the signed-in approver.

use std::collections::HashSet;

use contracts::domain::a001_travel_request::{CreateRevisionDto, TravelRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::{destination_columns, folio_column, status_column};
use crate::domain::a001_travel_request::api;
use crate::domain::a001_travel_request::rows::{destination_display_row, keys, request_rows};
use crate::layout::app_state::AppState;
use crate::shared::components::data_table::{Column, DataTable, Expansion};
use crate::shared::format::format_money;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::auth::session::Session;

const TOGGLE: &str = "toggle";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Approve,
    Deny,
}

impl Decision {
    fn action(&self) -> &'static str {
        match self {
            Decision::Approve => "aprobar la solicitud",
            Decision::Deny => "denegar la solicitud",
        }
    }

    fn done(&self, id: i64) -> String {
        match self {
            Decision::Approve => format!("Solicitud #{} aprobada", id),
            Decision::Deny => format!("Solicitud #{} denegada", id),
        }
    }
}

/// Add `index` if missing, remove it otherwise
pub fn toggle_index(set: &mut HashSet<usize>, index: usize) {
    if !set.remove(&index) {
        set.insert(index);
    }
}

#[derive(Clone, Copy)]
struct ApprovalsState {
    requests: RwSignal<Option<Vec<TravelRequest>>>,
    expanded: RwSignal<HashSet<usize>>,
    busy: RwSignal<Option<i64>>,
    revision_for: RwSignal<Option<i64>>,
    comment: RwSignal<String>,
    revision_error: RwSignal<Option<String>>,
    session: Session,
    app: AppState,
}

impl ApprovalsState {
    fn new(session: Session, app: AppState) -> Self {
        Self {
            requests: RwSignal::new(None),
            expanded: RwSignal::new(HashSet::new()),
            busy: RwSignal::new(None),
            revision_for: RwSignal::new(None),
            comment: RwSignal::new(String::new()),
            revision_error: RwSignal::new(None),
            session,
            app,
        }
    }

    fn load(&self) {
        let this = *self;
        spawn_local(async move {
            match api::fetch_to_approve(&this.session.api()).await {
                Ok(list) => {
                    this.expanded.set(HashSet::new());
                    this.requests.set(Some(list));
                }
                Err(err) => {
                    this.app
                        .report_error(this.session, "cargar las solicitudes por aprobar", &err);
                    this.requests.set(Some(Vec::new()));
                }
            }
        });
    }

    fn decide(&self, id: i64, decision: Decision) {
        if self.busy.get_untracked().is_some() {
            return;
        }
        let this = *self;
        this.busy.set(Some(id));
        spawn_local(async move {
            let api = this.session.api();
            let result = match decision {
                Decision::Approve => api::approve_request(&api, id).await,
                Decision::Deny => api::deny_request(&api, id).await,
            };
            match result {
                Ok(()) => {
                    this.app.toasts.success(decision.done(id));
                    this.load();
                }
                Err(err) => this.app.report_error(this.session, decision.action(), &err),
            }
            this.busy.set(None);
        });
    }

    fn open_revision(&self, id: i64) {
        self.comment.set(String::new());
        self.revision_error.set(None);
        self.revision_for.set(Some(id));
    }

    fn send_revision(&self) {
        let Some(request_id) = self.revision_for.get_untracked() else {
            return;
        };
        let dto = CreateRevisionDto {
            request_id,
            comment: self.comment.get_untracked().trim().to_string(),
        };
        if let Err(message) = dto.validate() {
            self.revision_error.set(Some(message));
            return;
        }
        let this = *self;
        this.busy.set(Some(request_id));
        spawn_local(async move {
            match api::create_revision(&this.session.api(), &dto).await {
                Ok(()) => {
                    this.app
                        .toasts
                        .success(format!("Se pidieron cambios a la solicitud #{}", request_id));
                    this.revision_for.set(None);
                    this.load();
                }
                Err(err) => this
                    .app
                    .report_error(this.session, "enviar la revisión", &err),
            }
            this.busy.set(None);
        });
    }
}

fn columns(state: ApprovalsState) -> Vec<Column> {
    vec![
        Column::new(TOGGLE, "").render(move |ctx| {
            let index = ctx.row_index;
            let is_open = move || state.expanded.with(|set| set.contains(&index));
            view! {
                <button
                    class="table__toggle"
                    class:table__toggle--open=is_open
                    title="Ver destinos"
                    on:click=move |_| state.expanded.update(|set| toggle_index(set, index))
                >
                    {move || if is_open() { icon("chevron-down") } else { icon("chevron-right") }}
                </button>
            }
            .into_any()
        }),
        folio_column(),
        Column::new(keys::REQUESTER, "Solicitante"),
        Column::new(keys::MOTIVE, "Motivo"),
        Column::new(keys::ROUTE, "Ruta"),
        Column::new(keys::DEPARTURE, "Salida"),
        Column::new(keys::PRIORITY, "Prioridad"),
        status_column(),
        Column::new(keys::ADVANCE, "Anticipo").class("text-right"),
        Column::new(keys::ACTIONS, "Acciones")
            .class("table__cell--actions")
            .render(move |ctx| {
                let Some(id) = ctx.value.get_untracked().as_i64() else {
                    return ().into_any();
                };
                let disabled = Signal::derive(move || state.busy.get().is_some());
                view! {
                    <div class="row-actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| state.decide(id, Decision::Approve)
                            disabled=disabled
                        >
                            {icon("check")}
                            " Aprobar"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| state.open_revision(id)
                            disabled=disabled
                        >
                            {icon("edit")}
                            " Pedir cambios"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| state.decide(id, Decision::Deny)
                            disabled=disabled
                        >
                            {icon("x")}
                            " Denegar"
                        </Button>
                    </div>
                }
                .into_any()
            }),
    ]
}

fn expanded_row(state: ApprovalsState, index: usize) -> AnyView {
    let Some(request) = state
        .requests
        .with_untracked(|list| list.as_ref().and_then(|l| l.get(index).cloned()))
    else {
        return ().into_any();
    };
    let legs = request.destinations.iter().map(destination_display_row).collect::<Vec<_>>();
    let voucher_count = request.vouchers.len();
    let vouchers_total = request.vouchers_total();

    view! {
        <div class="expanded-detail">
            <p>
                <strong>"Requerimientos: "</strong>
                {request.requirements.unwrap_or_else(|| "-".to_string())}
            </p>
            <DataTable columns=destination_columns() initial_data=legs placeholder="" />
            {(voucher_count > 0).then(|| view! {
                <p class="expanded-detail__vouchers">
                    {format!("{} comprobante(s) por {}", voucher_count, format_money(vouchers_total))}
                </p>
            })}
        </div>
    }
    .into_any()
}

#[component]
pub fn ApprovalsPage(session: Session, app: AppState) -> impl IntoView {
    app.set_page_title("Aprobaciones");
    let state = ApprovalsState::new(session, app);
    state.load();

    let expansion = Expansion {
        expanded: state.expanded.into(),
        render_expanded_row: Callback::new(move |index: usize| expanded_row(state, index)),
    };

    view! {
        <PageFrame page_id="a001_travel_request--approvals" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    {icon("clipboard-check")}
                    <h1 class="page__title">"Solicitudes por aprobar"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| state.load()>
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || match state.requests.get() {
                    None => view! { <div class="page-loading"><Spinner /></div> }.into_any(),
                    Some(list) => view! {
                        <DataTable
                            columns=columns(state)
                            initial_data=request_rows(&list)
                            expansion=expansion
                            placeholder=""
                            empty_message="No tienes solicitudes pendientes de aprobar."
                            table_id="a001-approvals-table"
                        />
                    }
                    .into_any(),
                }}
            </div>

            <Show when=move || state.revision_for.get().is_some()>
                <Modal
                    title=format!("Pedir cambios a la solicitud #{}", state.revision_for.get_untracked().unwrap_or_default())
                    on_close=Callback::new(move |_| state.revision_for.set(None))
                    actions=move || view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| state.revision_for.set(None)
                        >
                            "Cancelar"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| state.send_revision()
                            disabled=Signal::derive(move || state.busy.get().is_some())
                        >
                            "Enviar"
                        </Button>
                    }
                >
                    <Label>"¿Qué debe corregir el solicitante?"</Label>
                    <Textarea value=state.comment placeholder="Ej. Ajustar fechas de regreso" />
                    {move || state.revision_error.get().map(|message| view! {
                        <div class="field-error">{message}</div>
                    })}
                </Modal>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_index() {
        let mut set = HashSet::new();
        toggle_index(&mut set, 2);
        assert!(set.contains(&2));
        toggle_index(&mut set, 5);
        toggle_index(&mut set, 2);
        assert_eq!(set, HashSet::from([5]));
    }

    #[test]
    fn test_decision_messages() {
        assert_eq!(Decision::Approve.done(4), "Solicitud #4 aprobada");
        assert_eq!(Decision::Deny.action(), "denegar la solicitud");
    }
}
