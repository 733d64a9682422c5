//! # Logging
//!
//! `tracing` subscriber setup. Output goes to stderr so stdout stays free for
//! the run report. `RUST_LOG` takes precedence over `--log-level`.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogFormat;
use crate::error::{SuiteError, SuiteResult};

/// Dependencies that are chatty at `debug`.
const QUIET_TARGETS: [&str; 4] = ["hyper=warn", "hyper_util=warn", "reqwest=info", "rustls=warn"];

pub fn init_logging(level: &str, format: LogFormat) -> SuiteResult<()> {
    let filter = build_filter(level)?;
    let is_terminal = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_ansi(is_terminal),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_ansi(is_terminal),
            )
            .try_init(),
    };
    result.map_err(|err| SuiteError::Config(format!("cannot install log subscriber: {err}")))
}

fn build_filter(level: &str) -> SuiteResult<EnvFilter> {
    let base = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|err| SuiteError::Config(format!("invalid log level `{level}`: {err}")))?,
    };

    let mut filter = base;
    for directive in QUIET_TARGETS {
        let directive: Directive = directive
            .parse()
            .map_err(|err| SuiteError::Config(format!("invalid log directive `{directive}`: {err}")))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}
