use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::{SuiteError, SuiteResult};

/// The raw outcome of one HTTP exchange. Nothing here is interpreted: a 404 is
/// just `status == 404`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: String,
    pub duration_ms: u64,
    pub size_bytes: usize,
    pub content_type: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Deserialize the body, keeping the raw text in the error when it does not fit `T`.
    pub fn json<T: DeserializeOwned>(&self) -> SuiteResult<T> {
        serde_json::from_str(&self.body).map_err(|err| SuiteError::Parse {
            expected: short_type_name::<T>().to_string(),
            message: err.to_string(),
            body: self.body.clone(),
        })
    }

    pub fn json_value(&self) -> SuiteResult<serde_json::Value> {
        self.json()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
pub(crate) fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        status_text: String::new(),
        headers: HashMap::from([("content-type".to_string(), "application/json".to_string())]),
        body: body.to_string(),
        duration_ms: 12,
        size_bytes: body.len(),
        content_type: "application/json".into(),
    }
}
