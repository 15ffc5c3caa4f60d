//! Voucher rows for the details listing and the upload table.

use contracts::domain::a002_voucher::{Currency, TaxType, Voucher, VoucherClass, VoucherDraft};
use serde_json::{json, Value};

use crate::shared::components::data_table::model::{number_cell, str_cell};
use crate::shared::components::data_table::Row;
use crate::shared::format::{format_money, format_money_with_currency};

pub mod keys {
    pub const CLASS: &str = "class";
    pub const AMOUNT: &str = "amount";
    pub const CURRENCY: &str = "currency";
    pub const TAX_TYPE: &str = "tax_type";
    pub const TAX: &str = "tax";
    pub const STATUS: &str = "status";
    pub const PDF: &str = "file_pdf";
    pub const XML: &str = "file_xml";
}

fn link_value(url: Option<&str>) -> Value {
    match url.filter(|u| !u.is_empty()) {
        Some(u) => json!(u),
        None => Value::Null,
    }
}

/// Read-only row of an uploaded voucher; `file_pdf` / `file_xml` hold URLs
pub fn voucher_row(voucher: &Voucher) -> Row {
    let mut row = Row::new();
    row.insert(keys::CLASS.into(), json!(voucher.class.label()));
    row.insert(
        keys::AMOUNT.into(),
        json!(format_money_with_currency(voucher.amount, voucher.currency.code())),
    );
    row.insert(keys::TAX_TYPE.into(), json!(voucher.tax_type.label()));
    row.insert(
        keys::TAX.into(),
        json!(format_money(voucher.tax_type.included_tax(voucher.amount))),
    );
    row.insert(keys::STATUS.into(), json!(voucher.status.label()));
    row.insert(keys::PDF.into(), link_value(voucher.pdf_url.as_deref()));
    row.insert(keys::XML.into(), link_value(voucher.xml_url.as_deref()));
    row
}

/// Draft described by a row of the upload table; `file_*` cells hold file names
pub fn draft_from_row(row: &Row) -> VoucherDraft {
    let file_name = |key: &str| Some(str_cell(row, key).to_string()).filter(|n| !n.is_empty());
    VoucherDraft {
        class: VoucherClass::from_code(str_cell(row, keys::CLASS)).unwrap_or_default(),
        amount: number_cell(row, keys::AMOUNT),
        currency: Currency::from_code(str_cell(row, keys::CURRENCY)).unwrap_or_default(),
        tax_type: TaxType::from_code(str_cell(row, keys::TAX_TYPE)).unwrap_or_default(),
        xml_file_name: file_name(keys::XML),
        pdf_file_name: file_name(keys::PDF),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_voucher::VoucherStatus;

    #[test]
    fn test_voucher_row() {
        let voucher = Voucher {
            id: Some(1),
            request_id: 9,
            class: VoucherClass::Food,
            amount: 116.0,
            currency: Currency::Mxn,
            tax_type: TaxType::Iva16,
            status: VoucherStatus::Approved,
            xml_url: None,
            pdf_url: Some("https://files/1.pdf".into()),
        };
        let row = voucher_row(&voucher);
        assert_eq!(row[keys::CLASS], json!("Alimentos"));
        assert_eq!(row[keys::AMOUNT], json!("$116.00 MXN"));
        assert_eq!(row[keys::TAX], json!("$16.00"));
        assert_eq!(row[keys::STATUS], json!("Aprobado"));
        assert_eq!(row[keys::XML], Value::Null);
    }

    #[test]
    fn test_draft_from_row() {
        let row: Row = serde_json::from_value(json!({
            "class": "flight",
            "amount": "3,450.00",
            "currency": "USD",
            "tax_type": "EXENTO",
            "file_pdf": "boleto.pdf",
            "file_xml": ""
        }))
        .unwrap();
        let draft = draft_from_row(&row);
        assert_eq!(draft.class, VoucherClass::Flight);
        assert_eq!(draft.amount, 3450.0);
        assert_eq!(draft.currency, Currency::Usd);
        assert_eq!(draft.tax_type, TaxType::Exempt);
        assert_eq!(draft.pdf_file_name.as_deref(), Some("boleto.pdf"));
        assert_eq!(draft.xml_file_name, None);
        assert!(draft.validate(0).is_empty());
    }

    #[test]
    fn test_draft_from_blank_row_uses_defaults() {
        let draft = draft_from_row(&Row::new());
        assert_eq!(draft.class, VoucherClass::Lodging);
        assert_eq!(draft.currency, Currency::Mxn);
        assert_eq!(draft.amount, 0.0);
        assert_eq!(draft.validate(2).len(), 3);
    }
}
