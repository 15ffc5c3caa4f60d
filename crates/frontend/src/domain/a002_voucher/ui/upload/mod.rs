mod view_model;

use contracts::domain::a002_voucher::{Currency, TaxType, VoucherClass};
use contracts::shared::validation::indexed_field;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use serde_json::Value;
use thaw::*;

use super::voucher_columns;
use crate::domain::a001_travel_request::ui::use_request_id;
use crate::domain::a002_voucher::rows::{keys, voucher_row};
use crate::layout::app_state::AppState;
use crate::shared::components::data_table::editors::{input_editor, select_editor, CellError};
use crate::shared::components::data_table::model::new_row;
use crate::shared::components::data_table::{CellContext, Column, DataTable, Row};
use crate::shared::format::format_money;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_FORM};
use crate::system::auth::session::Session;
use view_model::{rows_total, VoucherUploadViewModel};

fn cell_error(vm: VoucherUploadViewModel, field: &'static str) -> CellError {
    Callback::new(move |index: usize| vm.error(&indexed_field("vouchers", index, field)))
}

/// File picker; the cell keeps the file name, the file itself goes to the view model
fn file_editor(
    vm: VoucherUploadViewModel,
    key: &'static str,
    accept: &'static str,
) -> impl Fn(CellContext) -> AnyView + Send + Sync + 'static {
    let error = cell_error(vm, key);
    move |ctx: CellContext| {
        let CellContext { value, set, row_index } = ctx;
        let name = move || value.get().as_str().unwrap_or_default().to_string();
        view! {
            <div class="cell-editor cell-editor--file">
                <label class="file-picker" class:file-picker--invalid=move || error.run(row_index).is_some()>
                    <input
                        type="file"
                        accept=accept
                        on:change=move |ev| {
                            let input = event_target::<web_sys::HtmlInputElement>(&ev);
                            let file = input.files().and_then(|list| list.get(0));
                            let file_name = file.as_ref().map(|f| f.name()).unwrap_or_default();
                            vm.attach(row_index, key, file);
                            set.run(Value::String(file_name));
                        }
                    />
                    {icon("upload")}
                    <span class="file-picker__name">
                        {move || {
                            let current = name();
                            if current.is_empty() { "Elegir archivo".to_string() } else { current }
                        }}
                    </span>
                </label>
                {move || error.run(row_index).map(|message| view! { <div class="cell-error">{message}</div> })}
            </div>
        }
        .into_any()
    }
}

fn upload_columns(vm: VoucherUploadViewModel) -> Vec<Column> {
    let classes = VoucherClass::ALL.iter().map(|c| (c.code(), c.label())).collect();
    let currencies = Currency::ALL.iter().map(|c| (c.code(), c.code())).collect();
    let taxes = TaxType::ALL.iter().map(|t| (t.code(), t.label())).collect();
    vec![
        Column::new(keys::CLASS, "Tipo")
            .default_value(VoucherClass::default().code())
            .render(select_editor(classes)),
        Column::new(keys::AMOUNT, "Monto")
            .render(input_editor("number", Some(cell_error(vm, keys::AMOUNT)))),
        Column::new(keys::CURRENCY, "Moneda")
            .default_value(Currency::default().code())
            .render(select_editor(currencies)),
        Column::new(keys::TAX_TYPE, "Impuesto")
            .default_value(TaxType::default().code())
            .render(select_editor(taxes)),
        Column::new(keys::PDF, "PDF").render(file_editor(vm, keys::PDF, ".pdf,application/pdf")),
        Column::new(keys::XML, "XML (CFDI)").render(file_editor(vm, keys::XML, ".xml,text/xml")),
    ]
}

/// Upload the vouchers of a trip, one multipart request per row
#[component]
pub fn VoucherUploadPage(session: Session, app: AppState) -> impl IntoView {
    app.set_page_title("Comprobantes");
    let vm = VoucherUploadViewModel::new(session, app);
    let request_id = use_request_id();

    Effect::new(move |_| match request_id.get() {
        Some(id) => vm.load(id, new_row(&upload_columns(vm))),
        None => vm.blocked.set(Some("Solicitud no válida.".to_string())),
    });

    let on_rows_change = Callback::new(move |rows: Vec<Row>| vm.rows.set(rows));
    let total = Memo::new(move |_| vm.rows.with(|rows| rows_total(rows)));

    let already_uploaded = move || {
        vm.request.with(|request| {
            request
                .as_ref()
                .filter(|r| !r.vouchers.is_empty())
                .map(|r| r.vouchers.iter().map(voucher_row).collect::<Vec<_>>())
        })
    };

    let body = move || {
        if let Some(message) = vm.blocked.get() {
            return view! {
                <MessageBar intent=MessageBarIntent::Warning>{message}</MessageBar>
            }
            .into_any();
        }
        let Some(initial) = vm.table_rows.get() else {
            return view! { <div class="page-loading"><Spinner /></div> }.into_any();
        };

        view! {
            {move || already_uploaded().map(|rows| view! {
                <h2 class="section-title">"Comprobantes enviados"</h2>
                <DataTable columns=voucher_columns() initial_data=rows placeholder="-" />
            })}

            <h2 class="section-title">"Nuevos comprobantes"</h2>
            <p class="hint">"El XML es obligatorio para gastos en MXN."</p>
            <DataTable
                columns=upload_columns(vm)
                initial_data=initial
                on_data_change=on_rows_change
                allow_append=true
                append_label="Agregar comprobante"
                empty_message="Sin comprobantes pendientes por subir."
                table_id="a002-voucher-upload-table"
            />

            <div class="form-actions">
                <span class="form-actions__total">
                    "Total por subir: " <strong>{move || format_money(total.get())}</strong>
                </span>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.submit()
                    disabled=Signal::derive(move || vm.saving.get())
                    loading=Signal::derive(move || vm.saving.get())
                >
                    {icon("upload")}
                    " Subir y enviar a revisión"
                </Button>
            </div>
        }
        .into_any()
    };

    view! {
        <PageFrame page_id="a002_voucher--upload" category=PAGE_CAT_FORM>
            {move || vm.redirect.get().map(|path| view! { <Redirect path=path /> })}
            <div class="page__header">
                <div class="page__header-left">
                    {icon("file-text")}
                    <h1 class="page__title">
                        {move || match request_id.get() {
                            Some(id) => format!("Comprobantes de la solicitud #{}", id),
                            None => "Comprobantes".to_string(),
                        }}
                    </h1>
                </div>
            </div>
            <div class="page__content">{body}</div>
        </PageFrame>
    }
}
