use std::collections::HashMap;
use std::time::Instant;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::multipart::{Form, Part};

use crate::auth::AuthMethod;
use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};

use super::RequestExecutor;
use super::request::{ApiRequest, MultipartBody, RequestBody};
use super::response::ApiResponse;

/// `reqwest`-backed executor bound to one base URL.
///
/// Cloning is cheap and shares the underlying connection handling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthMethod,
}

impl ApiClient {
    pub fn from_config(config: &SuiteConfig) -> SuiteResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SuiteError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth: AuthMethod::from_api_key(config.api_key.as_deref()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a relative endpoint path.
    ///
    /// URL parsing resolves `.` and `..` segments (percent-encoded or not), which
    /// would silently retarget the request, so such paths are rejected.
    pub fn url_for(&self, path: &str) -> SuiteResult<reqwest::Url> {
        let path = path.trim_start_matches('/');
        let raw = format!("{}/{}", self.base_url, path);
        let target = path.split(['?', '#']).next().unwrap_or_default();
        if target.split('/').any(is_dot_segment) {
            return Err(SuiteError::InvalidUrl {
                url: raw,
                message: "dot segments would be resolved away by URL normalization".to_string(),
            });
        }
        reqwest::Url::parse(&raw).map_err(|e| SuiteError::InvalidUrl {
            url: raw,
            message: e.to_string(),
        })
    }
}

impl RequestExecutor for ApiClient {
    async fn execute(&self, request: ApiRequest) -> SuiteResult<ApiResponse> {
        let url = self.url_for(&request.path)?;
        let url_text = url.to_string();
        let transport_error = |message: String| SuiteError::Transport {
            method: request.method,
            url: url_text.clone(),
            message,
        };

        let mut req_builder = self.http.request(request.method.into(), url);
        req_builder = self.auth.apply(req_builder)?;
        req_builder = match request.body {
            RequestBody::Empty => req_builder,
            RequestBody::Json(value) => req_builder.json(&value),
            RequestBody::Form(fields) => req_builder.form(&fields),
            RequestBody::Multipart(body) => req_builder.multipart(multipart_form(body)?),
        };

        let started = Instant::now();
        let response = req_builder
            .send()
            .await
            .map_err(|e| transport_error(format!("Request failed: {e}")))?;

        let status = response.status();
        let headers = format_headers(response.headers());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("text/plain")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(format!("Failed to read response: {e}")))?;
        let elapsed = started.elapsed().as_millis() as u64;

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            headers,
            size_bytes: bytes.len(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
            duration_ms: elapsed,
            content_type,
        })
    }
}

fn multipart_form(body: MultipartBody) -> SuiteResult<Form> {
    let file = body.file;
    let part = Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.mime)
        .map_err(|e| SuiteError::Client(format!("Invalid MIME type `{}`: {e}", file.mime)))?;

    let mut form = Form::new().part(file.field, part);
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    Ok(form)
}

fn is_dot_segment(segment: &str) -> bool {
    let lowered = segment.to_ascii_lowercase();
    matches!(lowered.as_str(), "." | "%2e" | ".." | ".%2e" | "%2e." | "%2e%2e")
}

fn format_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<binary>");
            (name.as_str().to_string(), value.to_string())
        })
        .collect()
}
