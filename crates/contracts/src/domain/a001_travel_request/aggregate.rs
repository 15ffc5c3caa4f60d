use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::RequestStatus;
use crate::domain::a002_voucher::Voucher;
use crate::shared::validation::{indexed_field, FieldError};

/// Date format used by every date field exchanged with the API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Value types
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn code(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Baja",
            Priority::Medium => "Media",
            Priority::High => "Alta",
        }
    }
}

/// One leg of a trip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub destination_order: u32,
    pub origin_city: String,
    pub destination_city: String,
    /// `YYYY-MM-DD`
    pub departure_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub stay_days: u32,
    #[serde(default)]
    pub is_hotel_required: bool,
    #[serde(default)]
    pub is_plane_required: bool,
    #[serde(default)]
    pub is_round_trip: bool,
    #[serde(default)]
    pub details: Option<String>,
}

impl Destination {
    /// Nights between departure and return, 0 when either date is missing or invalid
    pub fn computed_stay_days(&self) -> u32 {
        let departure = parse_date(&self.departure_date);
        let back = self.return_date.as_deref().and_then(parse_date);
        match (departure, back) {
            (Some(d), Some(r)) if r >= d => (r - d).num_days() as u32,
            _ => 0,
        }
    }
}

/// Reviewer comment that sent a request back for changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    #[serde(default)]
    pub id: Option<i64>,
    pub request_id: i64,
    pub comment: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRevisionDto {
    pub request_id: i64,
    pub comment: String,
}

impl CreateRevisionDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.comment.trim().is_empty() {
            return Err("Describe los cambios que necesita la solicitud".into());
        }
        Ok(())
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Travel request as returned by `/requests`, `/requests/{id}` and the listing endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRequest {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub requester_name: Option<String>,
    pub motive: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub status: RequestStatus,
    #[serde(default)]
    pub advance_money: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub approver_id: Option<i64>,
    #[serde(default)]
    pub travel_agency_id: Option<i64>,
    #[serde(default)]
    pub travel_agency_name: Option<String>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub revisions: Vec<Revision>,
    #[serde(default)]
    pub vouchers: Vec<Voucher>,
}

impl TravelRequest {
    /// "Monterrey → CDMX → Monterrey"
    pub fn route_summary(&self) -> String {
        let mut legs = self.destinations.clone();
        legs.sort_by_key(|d| d.destination_order);
        let mut cities: Vec<&str> = Vec::with_capacity(legs.len() + 1);
        for leg in &legs {
            if cities.last() != Some(&leg.origin_city.as_str()) {
                cities.push(&leg.origin_city);
            }
            cities.push(&leg.destination_city);
        }
        cities.join(" → ")
    }

    pub fn first_departure(&self) -> Option<&str> {
        self.destinations
            .iter()
            .map(|d| d.departure_date.as_str())
            .filter(|d| !d.is_empty())
            .min()
    }

    pub fn last_return(&self) -> Option<&str> {
        self.destinations
            .iter()
            .filter_map(|d| d.return_date.as_deref())
            .filter(|d| !d.is_empty())
            .max()
    }

    /// Sum of uploaded vouchers, ignoring denied ones
    pub fn vouchers_total(&self) -> f64 {
        self.vouchers
            .iter()
            .filter(|v| !v.status.is_denied())
            .map(|v| v.amount)
            .sum()
    }
}

// ============================================================================
// Create / update DTO
// ============================================================================

/// Body of `POST /requests` and `PUT /requests/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRequestDto {
    pub motive: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub advance_money: f64,
    pub destinations: Vec<Destination>,
}

impl CreateRequestDto {
    /// Prefill the form from an existing request (edit after "changes needed")
    pub fn from_request(request: &TravelRequest) -> Self {
        Self {
            motive: request.motive.clone(),
            requirements: request.requirements.clone(),
            priority: request.priority,
            advance_money: request.advance_money,
            destinations: request.destinations.clone(),
        }
    }

    /// Trim text, renumber legs from 1 and derive stay days from the dates
    pub fn normalized(mut self) -> Self {
        self.motive = self.motive.trim().to_string();
        self.requirements = self
            .requirements
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        for (i, leg) in self.destinations.iter_mut().enumerate() {
            leg.destination_order = i as u32 + 1;
            leg.origin_city = leg.origin_city.trim().to_string();
            leg.destination_city = leg.destination_city.trim().to_string();
            leg.return_date = leg
                .return_date
                .take()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());
            leg.details = leg
                .details
                .take()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());
            leg.stay_days = leg.computed_stay_days();
        }
        self
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.motive.trim().is_empty() {
            errors.push(FieldError::new("motive", "El motivo del viaje es obligatorio"));
        }
        if !self.advance_money.is_finite() || self.advance_money < 0.0 {
            errors.push(FieldError::new(
                "advance_money",
                "El anticipo debe ser un monto mayor o igual a cero",
            ));
        }
        if self.destinations.is_empty() {
            errors.push(FieldError::new("destinations", "Agrega al menos un destino"));
        }

        for (i, leg) in self.destinations.iter().enumerate() {
            if leg.origin_city.trim().is_empty() {
                errors.push(FieldError::new(
                    indexed_field("destinations", i, "origin_city"),
                    "La ciudad de origen es obligatoria",
                ));
            }
            if leg.destination_city.trim().is_empty() {
                errors.push(FieldError::new(
                    indexed_field("destinations", i, "destination_city"),
                    "La ciudad de destino es obligatoria",
                ));
            }

            let departure = leg.departure_date.trim();
            let departure_parsed = if departure.is_empty() {
                errors.push(FieldError::new(
                    indexed_field("destinations", i, "departure_date"),
                    "La fecha de salida es obligatoria",
                ));
                None
            } else {
                let parsed = parse_date(departure);
                if parsed.is_none() {
                    errors.push(FieldError::new(
                        indexed_field("destinations", i, "departure_date"),
                        "Fecha inválida, usa el formato AAAA-MM-DD",
                    ));
                }
                parsed
            };

            if let Some(back) = leg.return_date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
                match parse_date(back) {
                    None => errors.push(FieldError::new(
                        indexed_field("destinations", i, "return_date"),
                        "Fecha inválida, usa el formato AAAA-MM-DD",
                    )),
                    Some(back) => {
                        if departure_parsed.is_some_and(|d| back < d) {
                            errors.push(FieldError::new(
                                indexed_field("destinations", i, "return_date"),
                                "La fecha de regreso no puede ser anterior a la salida",
                            ));
                        }
                    }
                }
            }
        }

        errors
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::error_for;

    fn leg(origin: &str, destination: &str, departure: &str, back: Option<&str>) -> Destination {
        Destination {
            origin_city: origin.into(),
            destination_city: destination.into(),
            departure_date: departure.into(),
            return_date: back.map(Into::into),
            ..Default::default()
        }
    }

    fn valid_dto() -> CreateRequestDto {
        CreateRequestDto {
            motive: "Visita a cliente".into(),
            requirements: None,
            priority: Priority::High,
            advance_money: 2500.0,
            destinations: vec![leg("Monterrey", "CDMX", "2025-03-10", Some("2025-03-12"))],
        }
    }

    #[test]
    fn test_valid_request_has_no_errors() {
        assert!(valid_dto().validate().is_empty());
    }

    #[test]
    fn test_required_fields() {
        let dto = CreateRequestDto {
            motive: "  ".into(),
            destinations: vec![leg("", "", "", None)],
            ..Default::default()
        };
        let errors = dto.validate();
        assert!(error_for(&errors, "motive").is_some());
        assert!(error_for(&errors, "destinations[0].origin_city").is_some());
        assert!(error_for(&errors, "destinations[0].destination_city").is_some());
        assert_eq!(
            error_for(&errors, "destinations[0].departure_date"),
            Some("La fecha de salida es obligatoria")
        );
    }

    #[test]
    fn test_at_least_one_destination() {
        let dto = CreateRequestDto {
            destinations: vec![],
            ..valid_dto()
        };
        assert_eq!(
            error_for(&dto.validate(), "destinations"),
            Some("Agrega al menos un destino")
        );
    }

    #[test]
    fn test_return_before_departure_is_rejected() {
        let dto = CreateRequestDto {
            destinations: vec![leg("MTY", "GDL", "2025-03-10", Some("2025-03-09"))],
            ..valid_dto()
        };
        assert!(error_for(&dto.validate(), "destinations[0].return_date").is_some());
    }

    #[test]
    fn test_negative_or_nan_advance_is_rejected() {
        for amount in [-1.0, f64::NAN, f64::INFINITY] {
            let dto = CreateRequestDto {
                advance_money: amount,
                ..valid_dto()
            };
            assert!(error_for(&dto.validate(), "advance_money").is_some());
        }
    }

    #[test]
    fn test_normalized_renumbers_and_computes_stay() {
        let dto = CreateRequestDto {
            motive: "  Auditoría ".into(),
            requirements: Some("   ".into()),
            destinations: vec![
                leg(" MTY ", "GDL", "2025-03-10", Some("2025-03-13")),
                leg("GDL", "MTY", "2025-03-13", Some("")),
            ],
            ..valid_dto()
        }
        .normalized();

        assert_eq!(dto.motive, "Auditoría");
        assert_eq!(dto.requirements, None);
        assert_eq!(dto.destinations[0].destination_order, 1);
        assert_eq!(dto.destinations[1].destination_order, 2);
        assert_eq!(dto.destinations[0].origin_city, "MTY");
        assert_eq!(dto.destinations[0].stay_days, 3);
        assert_eq!(dto.destinations[1].return_date, None);
        assert_eq!(dto.destinations[1].stay_days, 0);
    }

    #[test]
    fn test_route_summary_joins_consecutive_legs() {
        let request: TravelRequest = serde_json::from_value(serde_json::json!({
            "id": 7,
            "motive": "Capacitación",
            "status": "approved",
            "destinations": [
                {"destination_order": 2, "origin_city": "CDMX", "destination_city": "Monterrey", "departure_date": "2025-04-03"},
                {"destination_order": 1, "origin_city": "Monterrey", "destination_city": "CDMX", "departure_date": "2025-04-01", "return_date": "2025-04-03"}
            ]
        }))
        .unwrap();

        assert_eq!(request.route_summary(), "Monterrey → CDMX → Monterrey");
        assert_eq!(request.first_departure(), Some("2025-04-01"));
        assert_eq!(request.last_return(), Some("2025-04-03"));
        assert_eq!(request.priority, Priority::Medium);
    }

    #[test]
    fn test_revision_requires_comment() {
        let dto = CreateRevisionDto {
            request_id: 1,
            comment: " ".into(),
        };
        assert!(dto.validate().is_err());
    }
}
