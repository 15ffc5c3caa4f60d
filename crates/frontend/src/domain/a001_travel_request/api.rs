use contracts::domain::a001_travel_request::{
    CreateRequestDto, CreateRevisionDto, RequestStatus, TravelRequest,
};
use serde::de::IgnoredAny;
use serde::Serialize;
use serde_json::Value;

use crate::shared::api::{ApiClient, ApiResult, Body};

/// Query of `GET /requests/all`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AllRequestsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
}

/// Requests created by the signed-in user
pub async fn fetch_my_requests(api: &ApiClient) -> ApiResult<Vec<TravelRequest>> {
    api.get("/requests").await
}

pub async fn fetch_request(api: &ApiClient, id: i64) -> ApiResult<TravelRequest> {
    api.get(&format!("/requests/{}", id)).await
}

/// Every request visible to the user; the server may or may not honor `status`
pub async fn fetch_all_requests(
    api: &ApiClient,
    query: &AllRequestsQuery,
) -> ApiResult<Vec<TravelRequest>> {
    api.get_with_params("/requests/all", query).await
}

pub async fn fetch_to_approve(api: &ApiClient) -> ApiResult<Vec<TravelRequest>> {
    api.get("/requests/to-approve").await
}

pub async fn fetch_refunds_to_approve(api: &ApiClient) -> ApiResult<Vec<TravelRequest>> {
    api.get("/requests/refund-to-approve-SOI").await
}

/// Returns the id of the new request when the server reports it
pub async fn create_request(api: &ApiClient, dto: &CreateRequestDto) -> ApiResult<Option<i64>> {
    let created: Value = api.post("/requests", Body::json(dto)?).await?;
    Ok(created_id(&created))
}

pub async fn update_request(api: &ApiClient, id: i64, dto: &CreateRequestDto) -> ApiResult<()> {
    let _: IgnoredAny = api.put(&format!("/requests/{}", id), Body::json(dto)?).await?;
    Ok(())
}

pub async fn cancel_request(api: &ApiClient, id: i64) -> ApiResult<()> {
    put_action(api, &format!("/requests/cancel/{}", id)).await
}

pub async fn approve_request(api: &ApiClient, id: i64) -> ApiResult<()> {
    put_action(api, &format!("/requests/approve/{}", id)).await
}

pub async fn deny_request(api: &ApiClient, id: i64) -> ApiResult<()> {
    put_action(api, &format!("/requests/deny/{}", id)).await
}

/// SOI sign-off on the reimbursement of a finished trip
pub async fn approve_refund(api: &ApiClient, id: i64) -> ApiResult<()> {
    put_action(api, &format!("/requests/SOI-approve/{}", id)).await
}

/// Send a request back to its author with a comment
pub async fn create_revision(api: &ApiClient, dto: &CreateRevisionDto) -> ApiResult<()> {
    let _: IgnoredAny = api.post("/revisions", Body::json(dto)?).await?;
    Ok(())
}

async fn put_action(api: &ApiClient, path: &str) -> ApiResult<()> {
    let _: IgnoredAny = api.put(path, Body::Empty).await?;
    Ok(())
}

/// `{"id": 5}`, `{"id_request": 5}` or `{"request": {"id": 5}}`
fn created_id(body: &Value) -> Option<i64> {
    body.get("id")
        .or_else(|| body.get("id_request"))
        .or_else(|| body.get("request").and_then(|r| r.get("id")))
        .and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_id_shapes() {
        assert_eq!(created_id(&json!({"id": 5})), Some(5));
        assert_eq!(created_id(&json!({"id_request": 8})), Some(8));
        assert_eq!(created_id(&json!({"request": {"id": 3}})), Some(3));
        assert_eq!(created_id(&json!({"message": "ok"})), None);
        assert_eq!(created_id(&Value::Null), None);
    }

    #[test]
    fn test_all_requests_query_string() {
        let query = AllRequestsQuery {
            status: Some(RequestStatus::Approved),
        };
        assert_eq!(serde_qs::to_string(&query).unwrap(), "status=approved");
        assert_eq!(serde_qs::to_string(&AllRequestsQuery::default()).unwrap(), "");
    }
}
