//! HTTP access to the Monarca API

pub mod client;
pub mod error;

pub use client::{ApiClient, Body, Method, RequestConfig};
pub use error::ApiError;

pub type ApiResult<T> = Result<T, ApiError>;
