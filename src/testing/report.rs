use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::assertion::AssertionResult;

/// How a single recorded step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Passed,
    Failed,
    /// The backend showed a registered known deviation.
    Deviated { deviation: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
    /// `None` when the step failed before a response arrived.
    pub status: Option<u16>,
    pub duration_ms: u64,
    pub assertions: Vec<AssertionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioOutcome {
    Passed,
    Deviated,
    Failed,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub group: String,
    pub outcome: ScenarioOutcome,
    pub attempts: u32,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub steps: Vec<StepRecord>,
}

impl ScenarioReport {
    /// Deviation ids seen in this scenario's steps.
    pub fn deviations(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match &step.outcome {
                StepOutcome::Deviated { deviation } => Some(deviation.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Summary report for a batch run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub base_url: String,
    /// RFC 3339 start time.
    pub started_at: String,
    pub strict: bool,
    pub total: usize,
    pub passed: usize,
    pub deviated: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub scenarios: Vec<ScenarioReport>,
}

impl RunReport {
    pub fn new(
        base_url: impl Into<String>,
        started_at: impl Into<String>,
        strict: bool,
        duration_ms: u64,
        scenarios: Vec<ScenarioReport>,
    ) -> Self {
        let count = |wanted: &[ScenarioOutcome]| {
            scenarios
                .iter()
                .filter(|s| wanted.contains(&s.outcome))
                .count()
        };
        Self {
            base_url: base_url.into(),
            started_at: started_at.into(),
            strict,
            total: scenarios.len(),
            passed: count(&[ScenarioOutcome::Passed]),
            deviated: count(&[ScenarioOutcome::Deviated]),
            failed: count(&[ScenarioOutcome::Failed, ScenarioOutcome::TimedOut]),
            duration_ms,
            scenarios,
        }
    }

    /// Deviations only fail a run in strict mode.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && (!self.strict || self.deviated == 0)
    }

    pub fn summary_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "petstore-suite against {}", self.base_url);
        for scenario in &self.scenarios {
            let label = match scenario.outcome {
                ScenarioOutcome::Passed => "PASS",
                ScenarioOutcome::Deviated => "DEVN",
                ScenarioOutcome::Failed => "FAIL",
                ScenarioOutcome::TimedOut => "TIME",
            };
            let _ = write!(
                out,
                "  [{label}] {}/{} ({} ms",
                scenario.group, scenario.name, scenario.duration_ms
            );
            if scenario.attempts > 1 {
                let _ = write!(out, ", {} attempts", scenario.attempts);
            }
            let _ = writeln!(out, ")");

            for deviation in scenario.deviations() {
                let _ = writeln!(out, "         known deviation: {deviation}");
            }
            if let Some(error) = &scenario.error {
                let _ = writeln!(out, "         {error}");
            }
        }
        let _ = writeln!(
            out,
            "{} scenarios: {} passed, {} deviated, {} failed in {} ms{}",
            self.total,
            self.passed,
            self.deviated,
            self.failed,
            self.duration_ms,
            if self.strict { " (strict)" } else { "" }
        );
        out
    }
}
