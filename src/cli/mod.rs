//! # CLI
//!
//! Command-line surface for running the suite in CI pipelines.
//!
//! - `petstore-suite run` executes the catalog and exits 0 / 1 / 2
//!   (success / scenario failures / setup error)
//! - `petstore-suite list` prints the catalog
//! - report output as text or JSON

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "petstore-suite",
    version,
    about = "End-to-end contract suite for the pet-store REST API",
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file (defaults to ./petstore-suite.toml when present)
    #[arg(short, long, env = "PETSTORE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directives; RUST_LOG wins when set
    #[arg(short, long, default_value = "info", env = "PETSTORE_LOG_LEVEL", global = true)]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "PETSTORE_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the scenario catalog against the configured backend
    Run(RunArgs),
    /// List the scenarios that would run
    List(ListArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Base URL of the API, e.g. http://localhost:8080/v2
    #[arg(long)]
    pub base_url: Option<String>,

    /// Only run scenarios whose group or name contains PATTERN (repeatable)
    #[arg(short, long = "filter", value_name = "PATTERN")]
    pub filters: Vec<String>,

    /// Scenarios running at the same time
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Re-runs of a failed or timed-out scenario
    #[arg(long)]
    pub retries: Option<u32>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Directory for petstore-report.json
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Count known deviations as failures
    #[arg(long)]
    pub strict: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            workers: self.workers,
            retries: self.retries,
            timeout_ms: self.timeout_ms,
            report_dir: self.report_dir.clone(),
            strict: self.strict,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(short, long = "filter", value_name = "PATTERN")]
    pub filters: Vec<String>,
}

/// Output format for the run report on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "petstore-suite",
            "--log-format",
            "json",
            "run",
            "--base-url",
            "http://localhost:8080/v2",
            "-f",
            "pet",
            "--filter",
            "security",
            "--workers",
            "8",
            "--retries",
            "1",
            "--strict",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.log_format, LogFormat::Json);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.filters, ["pet", "security"]);
        assert_eq!(args.format, OutputFormat::Json);

        let overrides = args.overrides();
        assert_eq!(overrides.base_url.as_deref(), Some("http://localhost:8080/v2"));
        assert_eq!(overrides.workers, Some(8));
        assert_eq!(overrides.retries, Some(1));
        assert_eq!(overrides.timeout_ms, None);
        assert!(overrides.strict);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["petstore-suite", "list", "--config", "suite.toml", "-l", "debug"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("suite.toml")));
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Command::List(ListArgs { ref filters }) if filters.is_empty()));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["petstore-suite"]).is_err());
    }
}
