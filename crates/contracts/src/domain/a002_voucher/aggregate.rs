use serde::{Deserialize, Serialize};

use crate::shared::validation::{indexed_field, FieldError};

/// Multipart field names expected by `POST /vouchers/upload`
pub mod upload_fields {
    pub const REQUEST_ID: &str = "id_request";
    pub const CLASS: &str = "class";
    pub const AMOUNT: &str = "amount";
    pub const TAX_TYPE: &str = "tax_type";
    pub const STATUS: &str = "status";
    pub const CURRENCY: &str = "currency";
    pub const APPROVER_ID: &str = "id_approver";
    pub const FILE_XML: &str = "file_xml";
    pub const FILE_PDF: &str = "file_pdf";
}

// ============================================================================
// Value types
// ============================================================================

/// Expense category of a receipt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherClass {
    #[default]
    Lodging,
    Food,
    GroundTransport,
    Tolls,
    Flight,
    Other,
}

impl VoucherClass {
    pub const ALL: [VoucherClass; 6] = [
        VoucherClass::Lodging,
        VoucherClass::Food,
        VoucherClass::GroundTransport,
        VoucherClass::Tolls,
        VoucherClass::Flight,
        VoucherClass::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            VoucherClass::Lodging => "lodging",
            VoucherClass::Food => "food",
            VoucherClass::GroundTransport => "ground_transport",
            VoucherClass::Tolls => "tolls",
            VoucherClass::Flight => "flight",
            VoucherClass::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoucherClass::Lodging => "Hospedaje",
            VoucherClass::Food => "Alimentos",
            VoucherClass::GroundTransport => "Transporte terrestre",
            VoucherClass::Tolls => "Casetas",
            VoucherClass::Flight => "Vuelo",
            VoucherClass::Other => "Otro",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxType {
    #[default]
    #[serde(rename = "IVA_16")]
    Iva16,
    #[serde(rename = "IVA_8")]
    Iva8,
    #[serde(rename = "IVA_0")]
    Iva0,
    #[serde(rename = "EXENTO")]
    Exempt,
}

impl TaxType {
    pub const ALL: [TaxType; 4] = [TaxType::Iva16, TaxType::Iva8, TaxType::Iva0, TaxType::Exempt];

    pub fn code(&self) -> &'static str {
        match self {
            TaxType::Iva16 => "IVA_16",
            TaxType::Iva8 => "IVA_8",
            TaxType::Iva0 => "IVA_0",
            TaxType::Exempt => "EXENTO",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxType::Iva16 => "IVA 16%",
            TaxType::Iva8 => "IVA 8%",
            TaxType::Iva0 => "IVA 0%",
            TaxType::Exempt => "Exento",
        }
    }

    pub fn rate(&self) -> f64 {
        match self {
            TaxType::Iva16 => 0.16,
            TaxType::Iva8 => 0.08,
            TaxType::Iva0 | TaxType::Exempt => 0.0,
        }
    }

    /// Tax portion of an amount that already includes it
    pub fn included_tax(&self, gross: f64) -> f64 {
        let rate = self.rate();
        gross - gross / (1.0 + rate)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Mxn,
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Mxn, Currency::Usd, Currency::Eur];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Mxn => "MXN",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Only Mexican receipts come with a CFDI XML
    pub fn requires_cfdi(&self) -> bool {
        matches!(self, Currency::Mxn)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl VoucherStatus {
    pub fn code(&self) -> &'static str {
        match self {
            VoucherStatus::Pending => "pending",
            VoucherStatus::Approved => "approved",
            VoucherStatus::Denied => "denied",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoucherStatus::Pending => "Pendiente",
            VoucherStatus::Approved => "Aprobado",
            VoucherStatus::Denied => "Rechazado",
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, VoucherStatus::Denied)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Uploaded expense receipt attached to a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    #[serde(default)]
    pub id: Option<i64>,
    pub request_id: i64,
    pub class: VoucherClass,
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub tax_type: TaxType,
    #[serde(default)]
    pub status: VoucherStatus,
    #[serde(default)]
    pub xml_url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// A voucher being prepared for upload; files are referenced by name only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoucherDraft {
    pub class: VoucherClass,
    pub amount: f64,
    pub currency: Currency,
    pub tax_type: TaxType,
    pub xml_file_name: Option<String>,
    pub pdf_file_name: Option<String>,
}

impl VoucherDraft {
    /// Validate the draft at position `index` of the upload table
    pub fn validate(&self, index: usize) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if !self.amount.is_finite() || self.amount <= 0.0 {
            errors.push(FieldError::new(
                indexed_field("vouchers", index, "amount"),
                "El monto debe ser mayor a cero",
            ));
        }

        let pdf = self.pdf_file_name.as_deref().unwrap_or("");
        if pdf.is_empty() {
            errors.push(FieldError::new(
                indexed_field("vouchers", index, "file_pdf"),
                "Adjunta el PDF del comprobante",
            ));
        } else if !has_extension(pdf, "pdf") {
            errors.push(FieldError::new(
                indexed_field("vouchers", index, "file_pdf"),
                "El archivo debe ser PDF",
            ));
        }

        let xml = self.xml_file_name.as_deref().unwrap_or("");
        if xml.is_empty() {
            if self.currency.requires_cfdi() {
                errors.push(FieldError::new(
                    indexed_field("vouchers", index, "file_xml"),
                    "Adjunta el XML (CFDI) del comprobante",
                ));
            }
        } else if !has_extension(xml, "xml") {
            errors.push(FieldError::new(
                indexed_field("vouchers", index, "file_xml"),
                "El archivo debe ser XML",
            ));
        }

        errors
    }
}

fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::error_for;

    fn draft() -> VoucherDraft {
        VoucherDraft {
            class: VoucherClass::Food,
            amount: 350.0,
            currency: Currency::Mxn,
            tax_type: TaxType::Iva16,
            xml_file_name: Some("factura.xml".into()),
            pdf_file_name: Some("factura.PDF".into()),
        }
    }

    #[test]
    fn test_complete_draft_is_valid() {
        assert!(draft().validate(0).is_empty());
    }

    #[test]
    fn test_amount_must_be_positive() {
        let d = VoucherDraft {
            amount: 0.0,
            ..draft()
        };
        assert!(error_for(&d.validate(3), "vouchers[3].amount").is_some());
    }

    #[test]
    fn test_xml_required_only_for_mxn() {
        let mxn = VoucherDraft {
            xml_file_name: None,
            ..draft()
        };
        assert!(error_for(&mxn.validate(0), "vouchers[0].file_xml").is_some());

        let usd = VoucherDraft {
            xml_file_name: None,
            currency: Currency::Usd,
            ..draft()
        };
        assert!(usd.validate(0).is_empty());
    }

    #[test]
    fn test_wrong_extension() {
        let d = VoucherDraft {
            pdf_file_name: Some("foto.jpg".into()),
            ..draft()
        };
        assert_eq!(
            error_for(&d.validate(0), "vouchers[0].file_pdf"),
            Some("El archivo debe ser PDF")
        );
    }

    #[test]
    fn test_codes_round_trip_through_serde() {
        assert_eq!(serde_json::to_string(&TaxType::Exempt).unwrap(), "\"EXENTO\"");
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        assert_eq!(TaxType::from_code("IVA_8"), Some(TaxType::Iva8));
        assert_eq!(VoucherClass::from_code("ground_transport"), Some(VoucherClass::GroundTransport));
        assert_eq!(Currency::from_code("JPY"), None);
    }

    #[test]
    fn test_included_tax() {
        let tax = TaxType::Iva16.included_tax(116.0);
        assert!((tax - 16.0).abs() < 1e-9);
        assert_eq!(TaxType::Exempt.included_tax(100.0), 0.0);
    }
}
