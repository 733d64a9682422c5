//! # Authentication
//!
//! Credentials are passed through untouched. The suite never acquires,
//! refreshes or validates tokens.

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::{SuiteError, SuiteResult};

/// Header the pet-store API reads its key from.
pub const API_KEY_HEADER: &str = "api_key";

/// How requests are authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthMethod {
    #[default]
    None,
    ApiKey {
        header: String,
        value: String,
    },
}

impl AuthMethod {
    /// Pet-store style key in the `api_key` header, or nothing when no key is configured.
    pub fn from_api_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some(value) if !value.is_empty() => AuthMethod::ApiKey {
                header: API_KEY_HEADER.to_string(),
                value: value.to_string(),
            },
            _ => AuthMethod::None,
        }
    }

    pub fn apply(&self, req_builder: reqwest::RequestBuilder) -> SuiteResult<reqwest::RequestBuilder> {
        match self {
            AuthMethod::None => Ok(req_builder),
            AuthMethod::ApiKey { header, value } => {
                let header_name = HeaderName::from_bytes(header.as_bytes())
                    .map_err(|e| SuiteError::Config(format!("Invalid API key header `{header}`: {e}")))?;
                let header_value = HeaderValue::from_str(value)
                    .map_err(|e| SuiteError::Config(format!("Invalid API key header value: {e}")))?;
                Ok(req_builder.header(header_name, header_value))
            }
        }
    }
}
