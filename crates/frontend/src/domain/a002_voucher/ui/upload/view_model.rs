use std::collections::HashMap;

use contracts::domain::a001_travel_request::TravelRequest;
use contracts::domain::a002_voucher::VoucherDraft;
use contracts::shared::validation::{error_for, indexed_field, FieldError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use crate::domain::a001_travel_request::api::fetch_request;
use crate::domain::a002_voucher::api::{self, VoucherUpload};
use crate::domain::a002_voucher::rows::{draft_from_row, keys};
use crate::layout::app_state::AppState;
use crate::shared::api::ApiError;
use crate::shared::components::data_table::model::number_cell;
use crate::shared::components::data_table::Row;
use crate::system::auth::session::Session;

/// Files picked in the table, by (row index, `file_pdf` | `file_xml`)
pub type FileSlots<T> = HashMap<(usize, &'static str), T>;

/// Forget the first `count` rows' files and shift the rest up
pub fn drop_uploaded<T>(files: FileSlots<T>, count: usize) -> FileSlots<T> {
    files
        .into_iter()
        .filter(|((index, _), _)| *index >= count)
        .map(|((index, key), file)| ((index - count, key), file))
        .collect()
}

pub fn validate_rows(rows: &[Row]) -> Vec<FieldError> {
    rows.iter()
        .enumerate()
        .flat_map(|(i, row)| draft_from_row(row).validate(i))
        .collect()
}

/// Sum of the amounts typed so far; blank or invalid cells count as zero
pub fn rows_total(rows: &[Row]) -> f64 {
    rows.iter()
        .map(|row| number_cell(row, keys::AMOUNT))
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .sum()
}

struct PreparedUpload {
    draft: VoucherDraft,
    pdf: File,
    xml: Option<File>,
}

#[derive(Clone, Copy)]
pub struct VoucherUploadViewModel {
    pub request: RwSignal<Option<TravelRequest>>,
    pub blocked: RwSignal<Option<String>>,
    /// Rows the table mounts with; replaced to remount after a partial upload
    pub table_rows: RwSignal<Option<Vec<Row>>>,
    pub rows: RwSignal<Vec<Row>>,
    pub files: StoredValue<FileSlots<File>, LocalStorage>,
    pub errors: RwSignal<Vec<FieldError>>,
    pub saving: RwSignal<bool>,
    /// Vouchers sent during this visit
    pub uploaded: RwSignal<usize>,
    pub redirect: RwSignal<Option<String>>,
    session: Session,
    app: AppState,
}

impl VoucherUploadViewModel {
    pub fn new(session: Session, app: AppState) -> Self {
        Self {
            request: RwSignal::new(None),
            blocked: RwSignal::new(None),
            table_rows: RwSignal::new(None),
            rows: RwSignal::new(Vec::new()),
            files: StoredValue::new_local(HashMap::new()),
            errors: RwSignal::new(Vec::new()),
            saving: RwSignal::new(false),
            uploaded: RwSignal::new(0),
            redirect: RwSignal::new(None),
            session,
            app,
        }
    }

    pub fn load(&self, id: i64, blank_row: Row) {
        let this = *self;
        spawn_local(async move {
            match fetch_request(&this.session.api(), id).await {
                Ok(request) if !request.status.accepts_vouchers() => {
                    this.blocked.set(Some(format!(
                        "La solicitud #{} está en estado \"{}\" y no admite comprobantes.",
                        request.id,
                        request.status.label()
                    )));
                    this.request.set(Some(request));
                }
                Ok(request) => {
                    this.request.set(Some(request));
                    this.reset_rows(vec![blank_row]);
                }
                Err(err) => {
                    this.app.report_error(this.session, "cargar la solicitud", &err);
                    this.blocked
                        .set(Some("No se pudo cargar la solicitud.".to_string()));
                }
            }
        });
    }

    fn reset_rows(&self, rows: Vec<Row>) {
        self.rows.set(rows.clone());
        self.table_rows.set(Some(rows));
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.errors
            .with(|errors| error_for(errors, field).map(str::to_string))
    }

    pub fn attach(&self, index: usize, key: &'static str, file: Option<File>) {
        self.files.update_value(|files| match file {
            Some(file) => {
                files.insert((index, key), file);
            }
            None => {
                files.remove(&(index, key));
            }
        });
    }

    /// Rows as drafts with their files; `None` when something is missing
    fn prepare(&self, rows: &[Row]) -> Option<Vec<PreparedUpload>> {
        let mut missing = Vec::new();
        let prepared = self.files.with_value(|files| {
            rows.iter()
                .enumerate()
                .filter_map(|(i, row)| {
                    let pdf = files.get(&(i, keys::PDF)).cloned();
                    if pdf.is_none() {
                        missing.push(FieldError::new(
                            indexed_field("vouchers", i, keys::PDF),
                            "Vuelve a seleccionar el PDF",
                        ));
                    }
                    Some(PreparedUpload {
                        draft: draft_from_row(row),
                        pdf: pdf?,
                        xml: files.get(&(i, keys::XML)).cloned(),
                    })
                })
                .collect::<Vec<_>>()
        });
        if missing.is_empty() {
            Some(prepared)
        } else {
            self.errors.set(missing);
            None
        }
    }

    pub fn submit(&self) {
        if self.saving.get_untracked() {
            return;
        }
        let Some(request) = self.request.get_untracked() else {
            return;
        };
        let rows = self.rows.get_untracked();

        if rows.is_empty() {
            if self.uploaded.get_untracked() > 0 || !request.vouchers.is_empty() {
                self.finish(request.id);
            } else {
                self.app.toasts.error("Agrega al menos un comprobante.");
            }
            return;
        }

        let errors = validate_rows(&rows);
        if !errors.is_empty() {
            self.errors.set(errors);
            self.app.toasts.error("Revisa los campos marcados en rojo.");
            return;
        }
        self.errors.set(Vec::new());
        let Some(uploads) = self.prepare(&rows) else {
            self.app.toasts.error("Faltan archivos por adjuntar.");
            return;
        };

        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            let api_client = this.session.api();
            let mut sent = 0usize;
            let mut failure: Option<ApiError> = None;
            for upload in &uploads {
                let body = VoucherUpload {
                    request_id: request.id,
                    approver_id: request.approver_id,
                    draft: &upload.draft,
                    pdf: &upload.pdf,
                    xml: upload.xml.as_ref(),
                };
                match api::upload_voucher(&api_client, &body).await {
                    Ok(()) => sent += 1,
                    Err(err) => {
                        failure = Some(err);
                        break;
                    }
                }
            }
            this.uploaded.update(|n| *n += sent);

            match failure {
                None => {
                    this.reset_rows(Vec::new());
                    this.files.set_value(HashMap::new());
                    this.saving.set(false);
                    this.finish(request.id);
                }
                Some(err) => {
                    log::warn!(
                        "voucher upload for request {} stopped after {} of {}",
                        request.id,
                        sent,
                        uploads.len()
                    );
                    if sent > 0 {
                        this.files
                            .update_value(|files| *files = drop_uploaded(std::mem::take(files), sent));
                        this.reset_rows(rows[sent..].to_vec());
                        this.app.toasts.info(format!(
                            "Se subieron {} comprobante(s); los restantes siguen en la tabla.",
                            sent
                        ));
                    }
                    this.app.report_error(
                        this.session,
                        &format!("subir el comprobante {}", sent + 1),
                        &err,
                    );
                    this.saving.set(false);
                }
            }
        });
    }

    fn finish(&self, request_id: i64) {
        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            match api::finish_uploading(&this.session.api(), request_id).await {
                Ok(()) => {
                    this.app
                        .toasts
                        .success("Comprobantes enviados a revisión");
                    this.redirect
                        .set(Some(format!("/requests/{}", request_id)));
                }
                Err(err) => this.app.report_error(
                    this.session,
                    "enviar los comprobantes a revisión",
                    &err,
                ),
            }
            this.saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(amount: &str, pdf: &str, xml: &str, currency: &str) -> Row {
        serde_json::from_value(json!({
            "class": "food",
            "amount": amount,
            "currency": currency,
            "tax_type": "IVA_16",
            "file_pdf": pdf,
            "file_xml": xml
        }))
        .unwrap()
    }

    #[test]
    fn test_drop_uploaded_shifts_indices() {
        let mut files: FileSlots<&str> = HashMap::new();
        files.insert((0, keys::PDF), "a.pdf");
        files.insert((1, keys::PDF), "b.pdf");
        files.insert((2, keys::PDF), "c.pdf");
        files.insert((2, keys::XML), "c.xml");

        let left = drop_uploaded(files, 2);
        assert_eq!(left.len(), 2);
        assert_eq!(left[&(0, keys::PDF)], "c.pdf");
        assert_eq!(left[&(0, keys::XML)], "c.xml");
    }

    #[test]
    fn test_validate_rows_reports_each_row() {
        let rows = vec![
            row("100", "a.pdf", "a.xml", "MXN"),
            row("", "", "", "MXN"),
            row("50", "b.pdf", "", "USD"),
        ];
        let errors = validate_rows(&rows);
        assert!(error_for(&errors, "vouchers[0].amount").is_none());
        assert!(error_for(&errors, "vouchers[1].amount").is_some());
        assert!(error_for(&errors, "vouchers[1].file_pdf").is_some());
        assert!(error_for(&errors, "vouchers[1].file_xml").is_some());
        assert!(errors.iter().all(|e| !e.field.starts_with("vouchers[2]")));
    }

    #[test]
    fn test_rows_total_skips_invalid() {
        let rows = vec![
            row("1,200.50", "", "", "MXN"),
            row("abc", "", "", "MXN"),
            row("-5", "", "", "MXN"),
            row("99.5", "", "", "MXN"),
        ];
        assert_eq!(rows_total(&rows), 1300.0);
    }
}
