use contracts::domain::a002_voucher::{upload_fields, VoucherDraft, VoucherStatus};
use serde::de::IgnoredAny;
use web_sys::{File, FormData};

use crate::shared::api::{ApiClient, ApiError, ApiResult, Body, RequestConfig};

/// One voucher ready to be sent
pub struct VoucherUpload<'a> {
    pub request_id: i64,
    pub approver_id: Option<i64>,
    pub draft: &'a VoucherDraft,
    pub pdf: &'a File,
    pub xml: Option<&'a File>,
}

/// Text parts of the multipart body, in send order
pub fn text_fields(
    request_id: i64,
    approver_id: Option<i64>,
    draft: &VoucherDraft,
) -> Vec<(&'static str, String)> {
    vec![
        (upload_fields::REQUEST_ID, request_id.to_string()),
        (upload_fields::CLASS, draft.class.code().to_string()),
        (upload_fields::AMOUNT, format!("{:.2}", draft.amount)),
        (upload_fields::TAX_TYPE, draft.tax_type.code().to_string()),
        (upload_fields::STATUS, VoucherStatus::Pending.code().to_string()),
        (upload_fields::CURRENCY, draft.currency.code().to_string()),
        (
            upload_fields::APPROVER_ID,
            approver_id.map(|id| id.to_string()).unwrap_or_default(),
        ),
    ]
}

fn js_error(e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Request(format!("{e:?}"))
}

fn build_form(upload: &VoucherUpload<'_>) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in text_fields(upload.request_id, upload.approver_id, upload.draft) {
        form.append_with_str(name, &value).map_err(js_error)?;
    }
    form.append_with_blob_and_filename(upload_fields::FILE_PDF, upload.pdf, &upload.pdf.name())
        .map_err(js_error)?;
    if let Some(xml) = upload.xml {
        form.append_with_blob_and_filename(upload_fields::FILE_XML, xml, &xml.name())
            .map_err(js_error)?;
    }
    Ok(form)
}

/// `POST /vouchers/upload` as `multipart/form-data`
pub async fn upload_voucher(api: &ApiClient, upload: &VoucherUpload<'_>) -> ApiResult<()> {
    let form = build_form(upload)?;
    let config = RequestConfig::default().with_header("Accept", "application/json");
    let _: IgnoredAny = api
        .post_with_config("/vouchers/upload", Body::from(form), &config)
        .await?;
    Ok(())
}

/// Tell the API the traveller is done; the request moves on to voucher review
pub async fn finish_uploading(api: &ApiClient, request_id: i64) -> ApiResult<()> {
    let _: IgnoredAny = api
        .put(
            &format!("/requests/finished-uploading-vouchers/{}", request_id),
            Body::Empty,
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_voucher::{Currency, TaxType, VoucherClass};

    #[test]
    fn test_text_fields() {
        let draft = VoucherDraft {
            class: VoucherClass::GroundTransport,
            amount: 250.5,
            currency: Currency::Mxn,
            tax_type: TaxType::Iva8,
            ..Default::default()
        };
        let fields = text_fields(31, Some(4), &draft);
        assert_eq!(
            fields,
            vec![
                ("id_request", "31".to_string()),
                ("class", "ground_transport".to_string()),
                ("amount", "250.50".to_string()),
                ("tax_type", "IVA_8".to_string()),
                ("status", "pending".to_string()),
                ("currency", "MXN".to_string()),
                ("id_approver", "4".to_string()),
            ]
        );
        assert_eq!(text_fields(31, None, &draft)[6].1, "");
    }
}
