mod view_model;

use contracts::domain::a001_travel_request::Priority;
use contracts::shared::validation::indexed_field;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use thaw::*;

use super::use_request_id;
use crate::domain::a001_travel_request::rows::leg_keys;
use crate::layout::app_state::AppState;
use crate::shared::components::data_table::editors::{checkbox_editor, input_editor, CellError};
use crate::shared::components::data_table::{Column, DataTable, Row};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_FORM};
use crate::system::auth::session::Session;
use view_model::RequestFormViewModel;

fn leg_columns(vm: RequestFormViewModel) -> Vec<Column> {
    let error = move |field: &'static str| -> Option<CellError> {
        Some(Callback::new(move |index: usize| {
            vm.error(&indexed_field("destinations", index, field))
        }))
    };
    vec![
        Column::new(leg_keys::ORIGIN, "Origen").render(input_editor("text", error(leg_keys::ORIGIN))),
        Column::new(leg_keys::DESTINATION, "Destino")
            .render(input_editor("text", error(leg_keys::DESTINATION))),
        Column::new(leg_keys::DEPARTURE, "Salida")
            .render(input_editor("date", error(leg_keys::DEPARTURE))),
        Column::new(leg_keys::RETURN, "Regreso")
            .render(input_editor("date", error(leg_keys::RETURN))),
        Column::new(leg_keys::HOTEL, "Hotel")
            .default_value(false)
            .render(checkbox_editor()),
        Column::new(leg_keys::PLANE, "Avión")
            .default_value(false)
            .render(checkbox_editor()),
        Column::new(leg_keys::ROUND_TRIP, "Redondo")
            .default_value(false)
            .render(checkbox_editor()),
        Column::new(leg_keys::DETAILS, "Detalles").render(input_editor("text", None)),
    ]
}

fn field_error(vm: RequestFormViewModel, field: &'static str) -> impl IntoView {
    move || {
        vm.error(field)
            .map(|message| view! { <div class="field-error">{message}</div> })
    }
}

/// Create a request, or edit one sent back with "changes needed" when `edit` is set
#[component]
pub fn RequestFormPage(
    session: Session,
    app: AppState,
    #[prop(optional)] edit: bool,
) -> impl IntoView {
    let vm = RequestFormViewModel::new(session, app);
    let request_id = use_request_id();

    if edit {
        app.set_page_title("Editar solicitud");
        Effect::new(move |_| match request_id.get() {
            Some(id) => vm.load(id),
            None => vm
                .blocked
                .set(Some("Solicitud no válida.".to_string())),
        });
    } else {
        app.set_page_title("Nueva solicitud");
        vm.start_new();
    }

    let on_legs_change = Callback::new(move |rows: Vec<Row>| vm.legs.set(rows));
    let title = move || match vm.editing_id.get() {
        Some(id) => format!("Editar solicitud #{}", id),
        None => "Nueva solicitud de viaje".to_string(),
    };

    let form = move || {
        if let Some(message) = vm.blocked.get() {
            return view! {
                <MessageBar intent=MessageBarIntent::Warning>{message}</MessageBar>
            }
            .into_any();
        }
        let Some(initial) = vm.initial_legs.get() else {
            return view! { <div class="page-loading"><Spinner /></div> }.into_any();
        };

        view! {
            <div class="form-grid">
                <div class="form-group form-group--wide">
                    <Label>"Motivo del viaje"</Label>
                    <Input value=vm.motive placeholder="Ej. Visita a cliente en Guadalajara" />
                    {field_error(vm, "motive")}
                </div>
                <div class="form-group">
                    <Label>"Prioridad"</Label>
                    <Select value=vm.priority>
                        {Priority::ALL
                            .into_iter()
                            .map(|p| view! { <option value=p.code()>{p.label()}</option> })
                            .collect_view()}
                    </Select>
                </div>
                <div class="form-group">
                    <Label>"Anticipo solicitado (MXN)"</Label>
                    <Input value=vm.advance input_type=InputType::Number />
                    {field_error(vm, "advance_money")}
                </div>
                <div class="form-group form-group--wide">
                    <Label>"Requerimientos adicionales"</Label>
                    <Textarea value=vm.requirements placeholder="Hospedaje cerca del cliente, auto rentado..." />
                </div>
            </div>

            <h2 class="section-title">"Destinos"</h2>
            {field_error(vm, "destinations")}
            <DataTable
                columns=leg_columns(vm)
                initial_data=initial
                on_data_change=on_legs_change
                allow_append=true
                append_label="Agregar destino"
                table_id="a001-destinations-table"
            />

            <div class="form-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.submit()
                    disabled=Signal::derive(move || vm.saving.get())
                    loading=Signal::derive(move || vm.saving.get())
                >
                    {icon("save")}
                    {move || if vm.editing_id.get().is_some() { " Guardar y reenviar" } else { " Enviar solicitud" }}
                </Button>
            </div>
        }
        .into_any()
    };

    view! {
        <PageFrame page_id="a001_travel_request--form" category=PAGE_CAT_FORM>
            {move || vm.redirect.get().map(|path| view! { <Redirect path=path /> })}
            <div class="page__header">
                <div class="page__header-left">
                    {icon("file-text")}
                    <h1 class="page__title">{title}</h1>
                </div>
            </div>
            <div class="page__content">{form}</div>
        </PageFrame>
    }
}
