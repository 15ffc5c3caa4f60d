mod view_model;

use contracts::domain::a001_travel_request::{RequestStatus, Revision, TravelRequest};
use contracts::system::auth::{permissions, PermissionMode};
use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use super::{destination_columns, use_request_id};
use crate::domain::a001_travel_request::rows::destination_display_row;
use crate::domain::a002_voucher::rows::voucher_row;
use crate::domain::a002_voucher::ui::voucher_columns;
use crate::layout::app_state::AppState;
use crate::shared::components::data_table::DataTable;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::format::{format_date_opt, format_datetime, format_money};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use crate::system::auth::session::Session;
use view_model::RequestDetailsViewModel;

fn field(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-field">
            <span class="detail-field__label">{label}</span>
            <span class="detail-field__value">{value}</span>
        </div>
    }
}

fn revision_item(revision: Revision) -> impl IntoView {
    let author = revision
        .author_name
        .unwrap_or_else(|| "Aprobador".to_string());
    let when = revision
        .created_at
        .as_deref()
        .map(format_datetime)
        .unwrap_or_default();
    view! {
        <li class="revision">
            <div class="revision__meta">
                <strong>{author}</strong>
                <span class="muted">{when}</span>
            </div>
            <p class="revision__comment">{revision.comment}</p>
        </li>
    }
}

fn summary(request: &TravelRequest) -> impl IntoView {
    view! {
        <div class="detail-grid">
            {field("Motivo", request.motive.clone())}
            {field("Solicitante", request.requester_name.clone().unwrap_or_else(|| "-".into()))}
            {field("Prioridad", request.priority.label().to_string())}
            {field("Anticipo", format_money(request.advance_money))}
            {field("Creada", format_date_opt(request.created_at.as_deref()))}
            {field("Agencia", request.travel_agency_name.clone().unwrap_or_else(|| "Sin asignar".into()))}
            {field("Requerimientos", request.requirements.clone().unwrap_or_else(|| "-".into()))}
        </div>
    }
}

/// Header buttons the viewer gets for a request. History viewers reach this
/// page too, so every action also needs the requester-side permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderActions {
    edit: bool,
    upload_vouchers: bool,
    cancel: bool,
}

impl HeaderActions {
    fn new(status: RequestStatus, can: impl Fn(&'static str) -> bool) -> Self {
        let requester = can(permissions::CREATE_REQUEST);
        Self {
            edit: status.can_edit() && requester,
            upload_vouchers: status.accepts_vouchers() && can(permissions::UPLOAD_VOUCHERS),
            cancel: status.can_cancel() && requester,
        }
    }
}

#[component]
pub fn RequestDetailsPage(session: Session, app: AppState) -> impl IntoView {
    app.set_page_title("Detalle de solicitud");
    let vm = RequestDetailsViewModel::new(session, app);
    let request_id = use_request_id();

    Effect::new(move |_| match request_id.get() {
        Some(id) => vm.load(id),
        None => vm.not_found.set(true),
    });

    let can = move |permission: &'static str| {
        session.has_permissions(&[permission], PermissionMode::All)
    };

    let body = move || {
        if vm.not_found.get() {
            return view! {
                <MessageBar intent=MessageBarIntent::Warning>
                    "No encontramos esta solicitud."
                </MessageBar>
            }
            .into_any();
        }
        let Some(request) = vm.request.get() else {
            return view! { <div class="page-loading"><Spinner /></div> }.into_any();
        };

        let id = request.id;
        let status = request.status;
        let legs = request.destinations.iter().map(destination_display_row).collect::<Vec<_>>();
        let vouchers = request.vouchers.iter().map(voucher_row).collect::<Vec<_>>();
        let has_vouchers = !vouchers.is_empty();
        let vouchers_total = request.vouchers_total();
        let actions = HeaderActions::new(status, can);
        let revisions = request.revisions.clone();
        let has_revisions = !revisions.is_empty();

        view! {
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/requests">{icon("chevron-left")}</A>
                    <h1 class="page__title">{format!("Solicitud #{}", id)}</h1>
                    <StatusBadge status=status />
                </div>
                <div class="page__header-right">
                    {actions.edit.then(|| view! {
                        <A href=format!("/requests/{}/edit", id)>
                            <span class="link-button">{icon("edit")} " Editar"</span>
                        </A>
                    })}
                    {actions.upload_vouchers.then(|| view! {
                        <A href=format!("/requests/{}/vouchers", id)>
                            <span class="link-button link-button--primary">
                                {icon("upload")} " Subir comprobantes"
                            </span>
                        </A>
                    })}
                    {actions.cancel.then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.confirm_cancel.set(true)
                            disabled=Signal::derive(move || vm.cancelling.get())
                        >
                            {icon("x")}
                            " Cancelar solicitud"
                        </Button>
                    })}
                </div>
            </div>

            <div class="page__content">
                {summary(&request)}

                <h2 class="section-title">"Destinos"</h2>
                <DataTable
                    columns=destination_columns()
                    initial_data=legs
                    placeholder="-"
                    empty_message="Sin destinos registrados."
                />

                {has_revisions.then(|| view! {
                    <h2 class="section-title">"Revisiones"</h2>
                    <ul class="revision-list">
                        {revisions.into_iter().map(revision_item).collect_view()}
                    </ul>
                })}

                {has_vouchers.then(|| view! {
                    <h2 class="section-title">"Comprobantes"</h2>
                    <DataTable columns=voucher_columns() initial_data=vouchers placeholder="-" />
                    <div class="totals-row">
                        "Total comprobado: " <strong>{format_money(vouchers_total)}</strong>
                    </div>
                })}
            </div>
        }
        .into_any()
    };

    view! {
        <PageFrame page_id="a001_travel_request--detail" category=PAGE_CAT_DETAIL>
            {body}
            <Show when=move || vm.confirm_cancel.get()>
                <Modal
                    title="Cancelar solicitud"
                    on_close=Callback::new(move |_| vm.confirm_cancel.set(false))
                    actions=move || view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.confirm_cancel.set(false)
                        >
                            "Volver"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.cancel()
                            disabled=Signal::derive(move || vm.cancelling.get())
                        >
                            "Sí, cancelar"
                        </Button>
                    }
                >
                    <p>"La solicitud dejará de avanzar y no podrá reactivarse. ¿Deseas continuar?"</p>
                </Modal>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(granted: &'static [&'static str]) -> impl Fn(&'static str) -> bool {
        move |permission| granted.contains(&permission)
    }

    #[test]
    fn test_history_viewer_cannot_cancel_or_edit() {
        let actions = HeaderActions::new(
            RequestStatus::Approved,
            holding(&[permissions::VIEW_HISTORY, permissions::APPROVE_REQUEST]),
        );
        assert!(!actions.cancel);
        assert!(!actions.edit);

        let actions = HeaderActions::new(RequestStatus::ChangesNeeded, holding(&[permissions::VIEW_HISTORY]));
        assert_eq!(
            actions,
            HeaderActions { edit: false, upload_vouchers: false, cancel: false }
        );
    }

    #[test]
    fn test_requester_actions_follow_status() {
        let requester = &[permissions::CREATE_REQUEST, permissions::VIEW_REQUESTS, permissions::UPLOAD_VOUCHERS];

        let actions = HeaderActions::new(RequestStatus::ChangesNeeded, holding(requester));
        assert!(actions.edit && actions.cancel && !actions.upload_vouchers);

        let actions = HeaderActions::new(RequestStatus::Approved, holding(requester));
        assert!(actions.cancel && !actions.edit);

        let actions = HeaderActions::new(RequestStatus::InProgress, holding(requester));
        assert_eq!(
            actions,
            HeaderActions { edit: false, upload_vouchers: true, cancel: false }
        );
    }
}
