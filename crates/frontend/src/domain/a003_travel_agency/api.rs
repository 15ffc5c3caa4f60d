use contracts::domain::a003_travel_agency::{AssignAgencyDto, TravelAgency};
use serde::de::IgnoredAny;

use crate::shared::api::{ApiClient, ApiResult, Body};

pub async fn fetch_agencies(api: &ApiClient) -> ApiResult<Vec<TravelAgency>> {
    api.get("/travel-agencies").await
}

/// `PATCH /requests/{id}` with the chosen agency
pub async fn assign_agency(api: &ApiClient, request_id: i64, agency_id: i64) -> ApiResult<()> {
    let dto = AssignAgencyDto {
        travel_agency_id: agency_id,
    };
    let _: IgnoredAny = api
        .patch(&format!("/requests/{}", request_id), Body::json(&dto)?)
        .await?;
    Ok(())
}
