//! # Testing & Assertions
//!
//! Harness the scenario catalog runs on.
//!
//! ## Pieces
//! - [`Assertion`]: status / header / JSON path / body / response-time checks
//! - [`KnownDeviation`]: documented-vs-observed status pairs the backend is known to get wrong
//! - [`ScenarioContext`]: services, step records and deferred cleanup for one scenario
//! - [`Runner`]: bounded concurrent execution with timeout and retries
//! - [`RunReport`]: totals, per-scenario results and a plain-text summary

pub mod assertion;
pub mod deviation;
pub mod report;
pub mod runner;
pub mod scenario;

pub use assertion::{Assertion, AssertionOperator, AssertionResult, AssertionTarget};
pub use deviation::{DeviationCheck, KnownDeviation};
pub use report::{RunReport, ScenarioOutcome, ScenarioReport, StepOutcome, StepRecord};
pub use runner::{RunSettings, Runner, run_scenario};
pub use scenario::{Cleanup, Scenario, ScenarioContext, ScenarioFn, ScenarioFuture};
