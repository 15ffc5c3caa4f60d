use contracts::domain::a001_travel_request::{CreateRequestDto, Destination, Priority};
use contracts::shared::validation::{error_for, FieldError};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_travel_request::api;
use crate::domain::a001_travel_request::rows::{destination_row, destinations_from_rows};
use crate::layout::app_state::AppState;
use crate::shared::components::data_table::Row;
use crate::shared::format::parse_amount;
use crate::system::auth::session::Session;

/// Create / edit form state. Destination rows mirror the table through
/// `on_data_change`.
#[derive(Clone, Copy)]
pub struct RequestFormViewModel {
    pub motive: RwSignal<String>,
    pub requirements: RwSignal<String>,
    pub priority: RwSignal<String>,
    pub advance: RwSignal<String>,
    /// Rows the table mounts with; `None` until an edited request is loaded
    pub initial_legs: RwSignal<Option<Vec<Row>>>,
    pub legs: RwSignal<Vec<Row>>,
    pub errors: RwSignal<Vec<FieldError>>,
    pub saving: RwSignal<bool>,
    pub editing_id: RwSignal<Option<i64>>,
    /// Set when the loaded request can no longer be edited
    pub blocked: RwSignal<Option<String>>,
    /// Where to go once saved
    pub redirect: RwSignal<Option<String>>,
    session: Session,
    app: AppState,
}

impl RequestFormViewModel {
    pub fn new(session: Session, app: AppState) -> Self {
        Self {
            motive: RwSignal::new(String::new()),
            requirements: RwSignal::new(String::new()),
            priority: RwSignal::new(Priority::default().code().to_string()),
            advance: RwSignal::new("0".to_string()),
            initial_legs: RwSignal::new(None),
            legs: RwSignal::new(Vec::new()),
            errors: RwSignal::new(Vec::new()),
            saving: RwSignal::new(false),
            editing_id: RwSignal::new(None),
            blocked: RwSignal::new(None),
            redirect: RwSignal::new(None),
            session,
            app,
        }
    }

    /// Blank form with one empty leg
    pub fn start_new(&self) {
        let rows = vec![destination_row(&Destination::default())];
        self.legs.set(rows.clone());
        self.initial_legs.set(Some(rows));
    }

    pub fn fill(&self, dto: &CreateRequestDto) {
        self.motive.set(dto.motive.clone());
        self.requirements
            .set(dto.requirements.clone().unwrap_or_default());
        self.priority.set(dto.priority.code().to_string());
        self.advance.set(format!("{:.2}", dto.advance_money));
        let rows: Vec<Row> = dto.destinations.iter().map(destination_row).collect();
        self.legs.set(rows.clone());
        self.initial_legs.set(Some(rows));
    }

    pub fn load(&self, id: i64) {
        let this = *self;
        this.editing_id.set(Some(id));
        spawn_local(async move {
            match api::fetch_request(&this.session.api(), id).await {
                Ok(request) if !request.status.can_edit() => {
                    this.blocked.set(Some(format!(
                        "La solicitud #{} está en estado \"{}\" y ya no puede editarse.",
                        request.id,
                        request.status.label()
                    )));
                }
                Ok(request) => this.fill(&CreateRequestDto::from_request(&request)),
                Err(err) => {
                    this.app
                        .report_error(this.session, "cargar la solicitud", &err);
                    this.blocked
                        .set(Some("No se pudo cargar la solicitud.".to_string()));
                }
            }
        });
    }

    pub fn to_dto(&self) -> CreateRequestDto {
        CreateRequestDto {
            motive: self.motive.get_untracked(),
            requirements: Some(self.requirements.get_untracked()),
            priority: Priority::from_code(&self.priority.get_untracked()).unwrap_or_default(),
            advance_money: parse_amount(&self.advance.get_untracked()),
            destinations: self.legs.with_untracked(|rows| destinations_from_rows(rows)),
        }
        .normalized()
    }

    /// Reactive message for a field key such as `motive` or `destinations[0].origin_city`
    pub fn error(&self, field: &str) -> Option<String> {
        self.errors
            .with(|errors| error_for(errors, field).map(str::to_string))
    }

    /// Validate, then `POST /requests` or `PUT /requests/{id}`
    pub fn submit(&self) {
        if self.saving.get_untracked() {
            return;
        }
        let dto = self.to_dto();
        let errors = dto.validate();
        if !errors.is_empty() {
            log::debug!("request form rejected: {} field error(s)", errors.len());
            self.errors.set(errors);
            self.app.toasts.error("Revisa los campos marcados en rojo.");
            return;
        }
        self.errors.set(Vec::new());

        let this = *self;
        let editing = this.editing_id.get_untracked();
        this.saving.set(true);
        spawn_local(async move {
            let api = this.session.api();
            let result = match editing {
                Some(id) => api::update_request(&api, id, &dto).await.map(|_| Some(id)),
                None => api::create_request(&api, &dto).await,
            };
            match result {
                Ok(id) => {
                    this.app.toasts.success(match editing {
                        Some(_) => "Solicitud actualizada y enviada a revisión",
                        None => "Solicitud creada",
                    });
                    let target = id
                        .map(|id| format!("/requests/{}", id))
                        .unwrap_or_else(|| "/requests".to_string());
                    this.redirect.set(Some(target));
                }
                Err(err) => {
                    let action = if editing.is_some() {
                        "guardar los cambios"
                    } else {
                        "crear la solicitud"
                    };
                    this.app.report_error(this.session, action, &err);
                }
            }
            this.saving.set(false);
        });
    }
}
