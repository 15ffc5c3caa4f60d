use contracts::system::auth::{LoginRequest, LoginResponse, UserProfile};
use serde::de::IgnoredAny;

use crate::shared::api::{ApiClient, ApiResult, Body};

pub async fn login(api: &ApiClient, request: &LoginRequest) -> ApiResult<LoginResponse> {
    api.post("/login", Body::json(request)?).await
}

/// Profile of the user behind the current session cookie / token
pub async fn fetch_profile(api: &ApiClient) -> ApiResult<UserProfile> {
    api.get("/login/profile").await
}

pub async fn logout(api: &ApiClient) -> ApiResult<()> {
    let _: IgnoredAny = api.post("/login/logout", Body::Empty).await?;
    Ok(())
}
