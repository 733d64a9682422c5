use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use tokio::sync::Semaphore;
use tracing::{Instrument, error, info, info_span, warn};

use crate::config::SuiteConfig;
use crate::http::ApiClient;

use super::report::{RunReport, ScenarioOutcome, ScenarioReport, StepOutcome};
use super::scenario::{Scenario, ScenarioContext};

/// Knobs the runner honours; everything else comes from the client.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub workers: usize,
    pub retries: u32,
    pub scenario_timeout: Duration,
    pub response_budget: Duration,
    pub strict: bool,
}

impl From<&SuiteConfig> for RunSettings {
    fn from(config: &SuiteConfig) -> Self {
        Self {
            workers: config.workers.max(1),
            retries: config.retries,
            scenario_timeout: config.scenario_timeout(),
            response_budget: config.response_budget(),
            strict: config.strict,
        }
    }
}

/// Runs scenarios concurrently, each on its own task, at most `workers` at a time.
#[derive(Debug, Clone)]
pub struct Runner {
    client: ApiClient,
    settings: RunSettings,
}

impl Runner {
    pub fn new(client: ApiClient, settings: RunSettings) -> Self {
        Self { client, settings }
    }

    /// Run every scenario and collect a report in the order given.
    pub async fn run(&self, scenarios: &[Scenario]) -> RunReport {
        let started_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let started = Instant::now();
        let permits = Arc::new(Semaphore::new(self.settings.workers.max(1)));

        info!(
            base_url = self.client.base_url(),
            scenarios = scenarios.len(),
            workers = self.settings.workers,
            "starting run"
        );

        let handles: Vec<_> = scenarios
            .iter()
            .map(|scenario| {
                let scenario = *scenario;
                let client = self.client.clone();
                let settings = self.settings.clone();
                let permits = Arc::clone(&permits);
                let handle = tokio::spawn(async move {
                    // The semaphore is never closed, so acquiring only waits.
                    let _permit = permits.acquire_owned().await.ok();
                    run_scenario(client, scenario, &settings).await
                });
                (scenario, handle)
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for (scenario, handle) in handles {
            let report = match handle.await {
                Ok(report) => report,
                Err(join_error) => {
                    error!(scenario = scenario.name, error = %join_error, "scenario task aborted");
                    ScenarioReport {
                        name: scenario.name.to_string(),
                        group: scenario.group.to_string(),
                        outcome: ScenarioOutcome::Failed,
                        attempts: 1,
                        duration_ms: 0,
                        error: Some(format!("scenario task aborted: {join_error}")),
                        steps: Vec::new(),
                    }
                }
            };
            reports.push(report);
        }

        let report = RunReport::new(
            self.client.base_url(),
            started_at,
            self.settings.strict,
            started.elapsed().as_millis() as u64,
            reports,
        );
        info!(
            passed = report.passed,
            deviated = report.deviated,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "run finished"
        );
        report
    }
}

/// Run one scenario, re-running failed or timed-out attempts up to `retries` times.
pub async fn run_scenario(client: ApiClient, scenario: Scenario, settings: &RunSettings) -> ScenarioReport {
    let span = info_span!("scenario", group = scenario.group, name = scenario.name);
    async move {
        let max_attempts = settings.retries.saturating_add(1);
        let mut attempt = 1;
        loop {
            let report = run_attempt(client.clone(), scenario, settings, attempt).await;
            let retryable = matches!(report.outcome, ScenarioOutcome::Failed | ScenarioOutcome::TimedOut);
            if !retryable || attempt >= max_attempts {
                return report;
            }
            warn!(attempt, error = report.error.as_deref().unwrap_or(""), "retrying scenario");
            attempt += 1;
        }
    }
    .instrument(span)
    .await
}

async fn run_attempt(client: ApiClient, scenario: Scenario, settings: &RunSettings, attempt: u32) -> ScenarioReport {
    info!(attempt, "scenario started");
    let started = Instant::now();
    let mut ctx = ScenarioContext::new(client, settings.response_budget);

    let body = async {
        let result = (scenario.run)(&mut ctx).await;
        let failed_cleanups = ctx.run_cleanup().await;
        if failed_cleanups > 0 {
            warn!(failed_cleanups, "some resources may have leaked");
        }
        result
    };
    let result = tokio::time::timeout(settings.scenario_timeout, body).await;
    let duration_ms = started.elapsed().as_millis() as u64;
    let steps = ctx.into_steps();

    let (outcome, error) = match result {
        Err(_) => {
            warn!(timeout_ms = settings.scenario_timeout.as_millis() as u64, "scenario timed out, cleanup skipped");
            (
                ScenarioOutcome::TimedOut,
                Some(format!(
                    "timed out after {} ms",
                    settings.scenario_timeout.as_millis()
                )),
            )
        }
        Ok(Err(err)) => {
            error!(error = %err, "scenario failed");
            (ScenarioOutcome::Failed, Some(err.to_string()))
        }
        Ok(Ok(())) => {
            let deviated = steps
                .iter()
                .any(|step| matches!(step.outcome, StepOutcome::Deviated { .. }));
            if deviated {
                info!(duration_ms, "scenario finished with known deviations");
                (ScenarioOutcome::Deviated, None)
            } else {
                info!(duration_ms, "scenario passed");
                (ScenarioOutcome::Passed, None)
            }
        }
    };

    ScenarioReport {
        name: scenario.name.to_string(),
        group: scenario.group.to_string(),
        outcome,
        attempts: attempt,
        duration_ms,
        error,
        steps,
    }
}
