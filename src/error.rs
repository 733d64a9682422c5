//! Error types shared by the contract layer, the harness and the CLI.

use std::path::PathBuf;

use thiserror::Error;

use crate::http::method::HttpMethod;

/// Result alias used throughout the crate.
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Everything that can go wrong while talking to the API or running scenarios.
///
/// HTTP error statuses are not errors here: a 404 or 500 is a normal
/// [`ApiResponse`](crate::http::response::ApiResponse) for the scenario to judge.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("invalid URL `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    /// Connection refused, timeout, or a body that could not be read.
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: HttpMethod,
        url: String,
        message: String,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The response body did not have the expected shape. Carries the raw body.
    #[error("failed to parse response as {expected}: {message}; raw body: {body}")]
    Parse {
        expected: String,
        message: String,
        body: String,
    },

    #[error("step `{step}` failed: {details}")]
    StepFailed { step: String, details: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error at `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl SuiteError {
    pub fn step(step: impl Into<String>, details: impl Into<String>) -> Self {
        Self::StepFailed {
            step: step.into(),
            details: details.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the failure happened below HTTP (no status code was received).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::InvalidUrl { .. })
    }
}

impl From<config::ConfigError> for SuiteError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
