//! # HTTP transport
//!
//! The single request-executor capability every service wrapper is built on.
//! [`RequestExecutor`] performs exactly one exchange per call and hands back the
//! raw [`ApiResponse`]; [`ApiClient`] is the `reqwest` implementation.

pub mod client;
pub mod method;
pub mod request;
pub mod response;

use std::future::Future;

use crate::error::SuiteResult;

pub use client::ApiClient;
pub use method::HttpMethod;
pub use request::{ApiRequest, FilePart, MultipartBody, RequestBody};
pub use response::ApiResponse;

/// Performs one HTTP exchange. No retries, no caching, no state between calls.
pub trait RequestExecutor: Send + Sync {
    fn execute(&self, request: ApiRequest) -> impl Future<Output = SuiteResult<ApiResponse>> + Send;
}
