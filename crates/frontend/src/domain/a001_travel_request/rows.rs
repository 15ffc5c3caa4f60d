//! Mapping between travel-request DTOs and `DataTable` rows.

use contracts::domain::a001_travel_request::{Destination, RequestStatus, TravelRequest};
use serde_json::{json, Value};

use crate::shared::components::data_table::model::{bool_cell, str_cell};
use crate::shared::components::data_table::Row;
use crate::shared::format::{format_date, format_date_opt, format_money};

pub mod keys {
    pub const ID: &str = "id";
    pub const MOTIVE: &str = "motive";
    pub const REQUESTER: &str = "requester";
    pub const ROUTE: &str = "route";
    pub const DEPARTURE: &str = "departure";
    pub const RETURN: &str = "return";
    pub const PRIORITY: &str = "priority";
    pub const STATUS: &str = "status";
    pub const ADVANCE: &str = "advance";
    pub const CREATED_AT: &str = "created_at";
    pub const AGENCY: &str = "agency";
    pub const ACTIONS: &str = "actions";
}

/// Keys of the destinations table; they match the `Destination` field names
pub mod leg_keys {
    pub const ORIGIN: &str = "origin_city";
    pub const DESTINATION: &str = "destination_city";
    pub const DEPARTURE: &str = "departure_date";
    pub const RETURN: &str = "return_date";
    pub const STAY_DAYS: &str = "stay_days";
    pub const HOTEL: &str = "is_hotel_required";
    pub const PLANE: &str = "is_plane_required";
    pub const ROUND_TRIP: &str = "is_round_trip";
    pub const DETAILS: &str = "details";
}

fn opt_text(value: Option<&str>) -> Value {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Value::String(v.to_string()),
        None => Value::Null,
    }
}

/// Display row for the request listings. Money and dates are preformatted,
/// status stays as its API code so renderers can build a badge.
pub fn request_row(request: &TravelRequest) -> Row {
    let mut row = Row::new();
    row.insert(keys::ID.into(), json!(request.id));
    row.insert(keys::MOTIVE.into(), json!(request.motive));
    row.insert(keys::REQUESTER.into(), opt_text(request.requester_name.as_deref()));
    row.insert(keys::ROUTE.into(), json!(request.route_summary()));
    row.insert(
        keys::DEPARTURE.into(),
        opt_text(request.first_departure().map(format_date).as_deref()),
    );
    row.insert(
        keys::RETURN.into(),
        opt_text(request.last_return().map(format_date).as_deref()),
    );
    row.insert(keys::PRIORITY.into(), json!(request.priority.label()));
    row.insert(keys::STATUS.into(), status_value(request.status));
    row.insert(keys::ADVANCE.into(), json!(format_money(request.advance_money)));
    row.insert(
        keys::CREATED_AT.into(),
        json!(format_date_opt(request.created_at.as_deref())),
    );
    row.insert(keys::AGENCY.into(), opt_text(request.travel_agency_name.as_deref()));
    // action cells render from the id
    row.insert(keys::ACTIONS.into(), json!(request.id));
    row
}

pub fn request_rows(requests: &[TravelRequest]) -> Vec<Row> {
    requests.iter().map(request_row).collect()
}

pub fn status_value(status: RequestStatus) -> Value {
    serde_json::to_value(status).unwrap_or(Value::Null)
}

/// Inverse of `status_value`; anything unrecognised is `Unknown`
pub fn status_of(value: &Value) -> RequestStatus {
    serde_json::from_value(value.clone()).unwrap_or(RequestStatus::Unknown)
}

/// Editable row for one leg. Dates stay `YYYY-MM-DD` for the date inputs.
pub fn destination_row(leg: &Destination) -> Row {
    let mut row = Row::new();
    row.insert(leg_keys::ORIGIN.into(), json!(leg.origin_city));
    row.insert(leg_keys::DESTINATION.into(), json!(leg.destination_city));
    row.insert(leg_keys::DEPARTURE.into(), json!(leg.departure_date));
    row.insert(
        leg_keys::RETURN.into(),
        json!(leg.return_date.clone().unwrap_or_default()),
    );
    row.insert(leg_keys::STAY_DAYS.into(), json!(leg.stay_days));
    row.insert(leg_keys::HOTEL.into(), json!(leg.is_hotel_required));
    row.insert(leg_keys::PLANE.into(), json!(leg.is_plane_required));
    row.insert(leg_keys::ROUND_TRIP.into(), json!(leg.is_round_trip));
    row.insert(
        leg_keys::DETAILS.into(),
        json!(leg.details.clone().unwrap_or_default()),
    );
    row
}

/// Read-only row for the details and approval screens
pub fn destination_display_row(leg: &Destination) -> Row {
    let mut row = destination_row(leg);
    row.insert(leg_keys::DEPARTURE.into(), json!(format_date(&leg.departure_date)));
    row.insert(
        leg_keys::RETURN.into(),
        opt_text(leg.return_date.as_deref().map(format_date).as_deref()),
    );
    row.insert(leg_keys::STAY_DAYS.into(), json!(leg.computed_stay_days()));
    row.insert(leg_keys::DETAILS.into(), opt_text(leg.details.as_deref()));
    row
}

pub fn destination_from_row(row: &Row) -> Destination {
    let return_date = str_cell(row, leg_keys::RETURN).to_string();
    let details = str_cell(row, leg_keys::DETAILS).to_string();
    Destination {
        destination_order: 0,
        origin_city: str_cell(row, leg_keys::ORIGIN).to_string(),
        destination_city: str_cell(row, leg_keys::DESTINATION).to_string(),
        departure_date: str_cell(row, leg_keys::DEPARTURE).to_string(),
        return_date: Some(return_date).filter(|d| !d.trim().is_empty()),
        stay_days: 0,
        is_hotel_required: bool_cell(row, leg_keys::HOTEL),
        is_plane_required: bool_cell(row, leg_keys::PLANE),
        is_round_trip: bool_cell(row, leg_keys::ROUND_TRIP),
        details: Some(details).filter(|d| !d.trim().is_empty()),
    }
}

pub fn destinations_from_rows(rows: &[Row]) -> Vec<Destination> {
    rows.iter().map(destination_from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_travel_request::Priority;

    fn leg(origin: &str, destination: &str, departure: &str, back: Option<&str>) -> Destination {
        Destination {
            origin_city: origin.into(),
            destination_city: destination.into(),
            departure_date: departure.into(),
            return_date: back.map(Into::into),
            ..Default::default()
        }
    }

    fn request() -> TravelRequest {
        serde_json::from_value(json!({
            "id": 42,
            "motive": "Visita a cliente",
            "status": "pending_review",
            "priority": "high",
            "advance_money": 2500.0,
            "created_at": "2024-03-01T10:00:00Z",
            "destinations": [
                {
                    "destination_order": 1,
                    "origin_city": "Monterrey",
                    "destination_city": "CDMX",
                    "departure_date": "2024-03-10",
                    "return_date": "2024-03-12"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_request_row() {
        let row = request_row(&request());
        assert_eq!(row[keys::ID], json!(42));
        assert_eq!(row[keys::ACTIONS], json!(42));
        assert_eq!(row[keys::ROUTE], json!("Monterrey → CDMX"));
        assert_eq!(row[keys::DEPARTURE], json!("10/03/2024"));
        assert_eq!(row[keys::RETURN], json!("12/03/2024"));
        assert_eq!(row[keys::ADVANCE], json!("$2,500.00"));
        assert_eq!(row[keys::PRIORITY], json!(Priority::High.label()));
        assert_eq!(row[keys::REQUESTER], Value::Null);
        assert_eq!(row[keys::AGENCY], Value::Null);
        assert_eq!(status_of(&row[keys::STATUS]), RequestStatus::PendingReview);
    }

    #[test]
    fn test_status_of_unknown() {
        assert_eq!(status_of(&json!("teleported")), RequestStatus::Unknown);
        assert_eq!(status_of(&Value::Null), RequestStatus::Unknown);
        assert_eq!(status_of(&status_value(RequestStatus::Cancelled)), RequestStatus::Cancelled);
    }

    #[test]
    fn test_destination_row_back_and_forth() {
        let mut original = leg("Monterrey", "Guadalajara", "2024-05-01", Some("2024-05-03"));
        original.is_hotel_required = true;
        original.details = Some("Vuelo temprano".into());

        let back = destination_from_row(&destination_row(&original));
        assert_eq!(back.origin_city, "Monterrey");
        assert_eq!(back.return_date.as_deref(), Some("2024-05-03"));
        assert!(back.is_hotel_required);
        assert!(!back.is_plane_required);
        assert_eq!(back.details.as_deref(), Some("Vuelo temprano"));
    }

    #[test]
    fn test_destination_from_blank_row() {
        let mut row = Row::new();
        row.insert(leg_keys::ORIGIN.into(), json!(""));
        row.insert(leg_keys::RETURN.into(), json!("  "));
        row.insert(leg_keys::HOTEL.into(), json!("true"));
        let leg = destination_from_row(&row);
        assert_eq!(leg.return_date, None);
        assert_eq!(leg.details, None);
        assert!(leg.is_hotel_required);
    }

    #[test]
    fn test_destination_display_row() {
        let row = destination_display_row(&leg("A", "B", "2024-05-01", None));
        assert_eq!(row[leg_keys::DEPARTURE], json!("01/05/2024"));
        assert_eq!(row[leg_keys::RETURN], Value::Null);
        assert_eq!(row[leg_keys::STAY_DAYS], json!(0));
    }
}
