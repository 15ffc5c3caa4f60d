//! Single point of egress to the Monarca API.
//!
//! Every request:
//! - goes to `{api_base}{path}`
//! - carries cookies (`credentials: include`)
//! - carries `Authorization: Bearer <token>` when a token is stored
//!
//! Failures are logged here, once, and handed back to the caller untouched.
//! There are no retries.

use std::fmt;
use std::sync::Arc;

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{FormData, RequestCredentials};

use super::error::{decode_body, ApiError};
use crate::system::auth::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// Request payload. The variant decides the encoding.
pub enum Body {
    Empty,
    /// Serialized JSON, sent as `application/json`
    Json(String),
    /// Sent as `multipart/form-data`; the browser writes the boundary header
    Multipart(FormData),
}

impl Body {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_string(value)
            .map(Body::Json)
            .map_err(|e| ApiError::Request(e.to_string()))
    }
}

impl From<FormData> for Body {
    fn from(form: FormData) -> Self {
        Body::Multipart(form)
    }
}

/// Per-call extras on top of the defaults
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub headers: Vec<(String, String)>,
}

impl RequestConfig {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path (`/requests/7` → `http://host:3000/requests/7`)
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::Get, path, None, Body::Empty, &RequestConfig::default())
            .await
    }

    /// GET with query parameters serialized by `serde_qs`
    pub async fn get_with_params<T, Q>(&self, path: &str, params: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query = match serde_qs::to_string(&params) {
            Ok(query) => query,
            Err(e) => {
                let error = ApiError::Request(e.to_string());
                log_failure(Method::Get, path, &error);
                return Err(error);
            }
        };
        self.send(Method::Get, path, Some(query), Body::Empty, &RequestConfig::default())
            .await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Body) -> Result<T, ApiError> {
        self.post_with_config(path, body, &RequestConfig::default())
            .await
    }

    pub async fn post_with_config<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Body,
        config: &RequestConfig,
    ) -> Result<T, ApiError> {
        self.send(Method::Post, path, None, body, config).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Body) -> Result<T, ApiError> {
        self.put_with_config(path, body, &RequestConfig::default())
            .await
    }

    pub async fn put_with_config<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Body,
        config: &RequestConfig,
    ) -> Result<T, ApiError> {
        self.send(Method::Put, path, None, body, config).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: Body) -> Result<T, ApiError> {
        self.patch_with_config(path, body, &RequestConfig::default())
            .await
    }

    pub async fn patch_with_config<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Body,
        config: &RequestConfig,
    ) -> Result<T, ApiError> {
        self.send(Method::Patch, path, None, body, config).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::Delete, path, None, Body::Empty, &RequestConfig::default())
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<String>,
        body: Body,
        config: &RequestConfig,
    ) -> Result<T, ApiError> {
        let result = self.execute(method, path, query, body, config).await;
        if let Err(error) = &result {
            log_failure(method, path, error);
        }
        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<String>,
        body: Body,
        config: &RequestConfig,
    ) -> Result<T, ApiError> {
        let mut url = self.url(path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(&query);
        }
        log::debug!("{} {}", method, url);

        let mut builder = builder_for(method, &url).credentials(RequestCredentials::Include);
        if let Some(token) = storage::get_access_token() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        for (name, value) in &config.headers {
            builder = builder.header(name, value);
        }

        let request = match body {
            Body::Empty => builder.build(),
            Body::Json(json) => builder.header("Content-Type", "application/json").body(json),
            Body::Multipart(form) => builder.body(form),
        }
        .map_err(|e| ApiError::Request(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::from_status(status, &text));
        }
        decode_body(&text)
    }
}

fn builder_for(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

fn log_failure(method: Method, path: &str, error: &ApiError) {
    match error {
        ApiError::Unauthorized => {
            log::warn!("[{}] {} {}: 401 unauthorized", error.category(), method, path)
        }
        ApiError::Status { status, message } => {
            log::error!("[{}] {} {}: {} {}", error.category(), method, path, status, message)
        }
        ApiError::Network(detail) => {
            log::error!("[{}] {} {}: no response: {}", error.category(), method, path, detail)
        }
        ApiError::Request(detail) | ApiError::Decode(detail) => {
            log::error!("[{}] {} {}: {}", error.category(), method, path, detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/requests/7"), "http://localhost:3000/requests/7");
        assert_eq!(client.url("travel-agencies"), "http://localhost:3000/travel-agencies");
    }

    #[test]
    fn test_json_body() {
        #[derive(Serialize)]
        struct Payload {
            comment: &'static str,
        }
        match Body::json(&Payload { comment: "ok" }).unwrap() {
            Body::Json(text) => assert_eq!(text, r#"{"comment":"ok"}"#),
            _ => panic!("expected a JSON body"),
        }
    }

    #[test]
    fn test_request_config_headers() {
        let config = RequestConfig::default().with_header("X-Trace", "abc");
        assert_eq!(config.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
    }
}
