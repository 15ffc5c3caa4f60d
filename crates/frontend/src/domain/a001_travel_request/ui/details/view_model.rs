use contracts::domain::a001_travel_request::TravelRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_travel_request::api;
use crate::layout::app_state::AppState;
use crate::system::auth::session::Session;

#[derive(Clone, Copy)]
pub struct RequestDetailsViewModel {
    pub request: RwSignal<Option<TravelRequest>>,
    pub loading: RwSignal<bool>,
    pub not_found: RwSignal<bool>,
    pub confirm_cancel: RwSignal<bool>,
    pub cancelling: RwSignal<bool>,
    session: Session,
    app: AppState,
}

impl RequestDetailsViewModel {
    pub fn new(session: Session, app: AppState) -> Self {
        Self {
            request: RwSignal::new(None),
            loading: RwSignal::new(false),
            not_found: RwSignal::new(false),
            confirm_cancel: RwSignal::new(false),
            cancelling: RwSignal::new(false),
            session,
            app,
        }
    }

    pub fn load(&self, id: i64) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match api::fetch_request(&this.session.api(), id).await {
                Ok(request) => {
                    this.app
                        .set_page_title(format!("Solicitud #{}", request.id));
                    this.not_found.set(false);
                    this.request.set(Some(request));
                }
                Err(err) => {
                    this.not_found.set(true);
                    this.app
                        .report_error(this.session, "cargar la solicitud", &err);
                }
            }
            this.loading.set(false);
        });
    }

    /// `PUT /requests/cancel/{id}`, then reload
    pub fn cancel(&self) {
        let Some(id) = self.request.with_untracked(|r| r.as_ref().map(|r| r.id)) else {
            return;
        };
        let this = *self;
        this.cancelling.set(true);
        spawn_local(async move {
            match api::cancel_request(&this.session.api(), id).await {
                Ok(()) => {
                    this.app.toasts.success(format!("Solicitud #{} cancelada", id));
                    this.load(id);
                }
                Err(err) => this
                    .app
                    .report_error(this.session, "cancelar la solicitud", &err),
            }
            this.cancelling.set(false);
            this.confirm_cancel.set(false);
        });
    }
}
