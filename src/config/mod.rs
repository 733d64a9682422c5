//! # Suite configuration
//!
//! One [`SuiteConfig`] is built at startup and passed by reference to everything
//! that needs it. Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `petstore-suite.toml` in the working directory, or an explicit file
//! 3. `PETSTORE_*` environment variables (`PETSTORE_BASE_URL`, `PETSTORE_WORKERS`, ...)
//! 4. command-line flags, applied with [`SuiteConfig::apply`]

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{SuiteError, SuiteResult};

pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";
const DEFAULT_CONFIG_FILE: &str = "petstore-suite";
const ENV_PREFIX: &str = "PETSTORE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    pub base_url: String,
    /// Sent as the `api_key` header when present.
    pub api_key: Option<String>,
    /// Per-request transport timeout.
    pub timeout_ms: u64,
    pub scenario_timeout_ms: u64,
    /// How many times a failed scenario is re-run.
    pub retries: u32,
    pub workers: usize,
    pub report_dir: PathBuf,
    /// Budget for the response-time assertion.
    pub max_response_ms: u64,
    /// Count known deviations as failures.
    pub strict: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_ms: 30_000,
            scenario_timeout_ms: 60_000,
            retries: 0,
            workers: 4,
            report_dir: PathBuf::from("reports"),
            max_response_ms: 2_000,
            strict: false,
        }
    }
}

/// Values supplied on the command line; `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub workers: Option<usize>,
    pub retries: Option<u32>,
    pub timeout_ms: Option<u64>,
    pub report_dir: Option<PathBuf>,
    pub strict: bool,
}

impl SuiteConfig {
    /// Load defaults, the config file and the environment.
    ///
    /// An explicit `path` must exist; the implicit `petstore-suite.toml` is optional.
    pub fn load(path: Option<&Path>) -> SuiteResult<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: SuiteConfig = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validated()
    }

    /// Load from a file only, ignoring the process environment.
    pub fn from_file(path: &Path) -> SuiteResult<Self> {
        let config: SuiteConfig = Config::builder()
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        config.validated()
    }

    pub fn apply(mut self, overrides: &ConfigOverrides) -> SuiteResult<Self> {
        if let Some(base_url) = &overrides.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(workers) = overrides.workers {
            self.workers = workers;
        }
        if let Some(retries) = overrides.retries {
            self.retries = retries;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(report_dir) = &overrides.report_dir {
            self.report_dir = report_dir.clone();
        }
        self.strict |= overrides.strict;
        self.validated()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn scenario_timeout(&self) -> Duration {
        Duration::from_millis(self.scenario_timeout_ms)
    }

    pub fn response_budget(&self) -> Duration {
        Duration::from_millis(self.max_response_ms)
    }

    fn validated(mut self) -> SuiteResult<Self> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(SuiteError::Config("base_url cannot be empty".to_string()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(SuiteError::Config(format!(
                "base_url must start with http:// or https://, got `{trimmed}`"
            )));
        }
        self.base_url = trimmed.to_string();

        if self.workers == 0 {
            return Err(SuiteError::Config("workers must be at least 1".to_string()));
        }
        Ok(self)
    }
}
