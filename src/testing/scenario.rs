use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{SuiteError, SuiteResult};
use crate::http::{ApiClient, ApiResponse};
use crate::services::{PetService, StoreService, UserService};

use super::assertion::{Assertion, AssertionResult};
use super::deviation::{DeviationCheck, KnownDeviation};
use super::report::{StepOutcome, StepRecord};

/// Longest body excerpt carried into a failure message.
const MAX_BODY_EXCERPT: usize = 512;

pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = SuiteResult<()>> + Send + 'a>>;
pub type ScenarioFn = for<'a> fn(&'a mut ScenarioContext) -> ScenarioFuture<'a>;

/// Build a [`Scenario`] from an `async fn(&mut ScenarioContext) -> SuiteResult<()>`;
/// the function name becomes the scenario name.
#[macro_export]
macro_rules! scenario {
    ($group:expr, $name:ident) => {{
        fn run(ctx: &mut $crate::testing::ScenarioContext) -> $crate::testing::ScenarioFuture<'_> {
            Box::pin($name(ctx))
        }
        $crate::testing::Scenario::new($group, stringify!($name), run)
    }};
}

/// One independent test case in the catalog.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub group: &'static str,
    pub run: ScenarioFn,
}

impl Scenario {
    pub const fn new(group: &'static str, name: &'static str, run: ScenarioFn) -> Self {
        Self { name, group, run }
    }

    /// Case-sensitive substring match on `group/name`.
    pub fn matches(&self, pattern: &str) -> bool {
        format!("{}/{}", self.group, self.name).contains(pattern)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("group", &self.group)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Resource to delete once the scenario body has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleanup {
    Pet(i64),
    Order(i64),
    User(String),
}

/// Everything a running scenario can touch: services bound to the run's client,
/// the steps recorded so far and the cleanups still owed.
pub struct ScenarioContext {
    client: ApiClient,
    response_budget: Duration,
    steps: Vec<StepRecord>,
    cleanups: Vec<Cleanup>,
}

impl ScenarioContext {
    pub fn new(client: ApiClient, response_budget: Duration) -> Self {
        Self {
            client,
            response_budget,
            steps: Vec::new(),
            cleanups: Vec::new(),
        }
    }

    pub fn pets(&self) -> PetService {
        PetService::new(self.client.clone())
    }

    pub fn store(&self) -> StoreService {
        StoreService::new(self.client.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.client.clone())
    }

    /// Upper bound for the response-time assertion.
    pub fn response_budget_ms(&self) -> u64 {
        self.response_budget.as_millis() as u64
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<StepRecord> {
        self.steps
    }

    /// Record a step and fail it unless every assertion holds.
    pub fn check(&mut self, step: &str, response: &ApiResponse, assertions: &[Assertion]) -> SuiteResult<()> {
        let results: Vec<AssertionResult> = assertions.iter().map(|a| a.evaluate(response)).collect();
        let failures: Vec<&str> = results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.message.as_str())
            .collect();

        if failures.is_empty() {
            self.record(step, StepOutcome::Passed, response, results, None);
            return Ok(());
        }

        let details = format!("{}; body: {}", failures.join("; "), excerpt(&response.body));
        self.record(step, StepOutcome::Failed, response, results, Some(details.clone()));
        Err(SuiteError::step(step, details))
    }

    /// Check a status that the backend is known to get wrong.
    pub fn check_deviation(
        &mut self,
        step: &str,
        response: &ApiResponse,
        deviation: &KnownDeviation,
    ) -> SuiteResult<()> {
        let assertion = Assertion::status(deviation.documented);
        let result = assertion.evaluate(response);

        match deviation.classify(response.status) {
            DeviationCheck::Conforming => {
                self.record(step, StepOutcome::Passed, response, vec![result], None);
                Ok(())
            }
            DeviationCheck::Deviating => {
                let detail = format!(
                    "known deviation `{}`: {} (documented {}, observed {})",
                    deviation.id, deviation.summary, deviation.documented, response.status
                );
                self.record(
                    step,
                    StepOutcome::Deviated {
                        deviation: deviation.id.to_string(),
                    },
                    response,
                    vec![result],
                    Some(detail),
                );
                Ok(())
            }
            DeviationCheck::Unexpected => {
                let details = format!(
                    "expected status {} (or known deviation {}), got {}; body: {}",
                    deviation.documented,
                    deviation.observed,
                    response.status,
                    excerpt(&response.body)
                );
                self.record(step, StepOutcome::Failed, response, vec![result], Some(details.clone()));
                Err(SuiteError::step(step, details))
            }
        }
    }

    /// Record a step whose verdict the scenario computed itself.
    pub fn ensure(
        &mut self,
        step: &str,
        response: &ApiResponse,
        holds: bool,
        details: impl Into<String>,
    ) -> SuiteResult<()> {
        if holds {
            self.record(step, StepOutcome::Passed, response, Vec::new(), None);
            return Ok(());
        }
        let details = details.into();
        self.record(step, StepOutcome::Failed, response, Vec::new(), Some(details.clone()));
        Err(SuiteError::step(step, details))
    }

    /// Parse the body; a mismatch fails the step with the raw body attached.
    pub fn parse<T: DeserializeOwned>(&mut self, step: &str, response: &ApiResponse) -> SuiteResult<T> {
        response.json().inspect_err(|err| {
            self.record(step, StepOutcome::Failed, response, Vec::new(), Some(err.to_string()));
        })
    }

    /// Register a resource for deletion after the scenario body, success or not.
    pub fn defer_cleanup(&mut self, cleanup: Cleanup) {
        self.cleanups.push(cleanup);
    }

    /// Register `cleanup` only when `response` shows the resource was accepted.
    /// A rejected or failed create leaves nothing to delete.
    pub fn defer_cleanup_if_created(&mut self, response: &ApiResponse, cleanup: Cleanup) {
        if response.is_success() {
            self.defer_cleanup(cleanup);
        } else {
            debug!(?cleanup, status = response.status, "create not accepted, no cleanup owed");
        }
    }

    /// Best-effort deletion of everything registered, most recent first.
    /// Returns how many cleanups could not be sent.
    pub async fn run_cleanup(&mut self) -> usize {
        let mut failed = 0;
        while let Some(cleanup) = self.cleanups.pop() {
            let result = match &cleanup {
                Cleanup::Pet(id) => self.pets().delete(id).await,
                Cleanup::Order(id) => self.store().delete_order(id).await,
                Cleanup::User(username) => self.users().delete(username).await,
            };
            match result {
                Ok(response) => debug!(?cleanup, status = response.status, "cleanup sent"),
                Err(err) => {
                    failed += 1;
                    warn!(?cleanup, error = %err, "cleanup failed");
                }
            }
        }
        failed
    }

    fn record(
        &mut self,
        step: &str,
        outcome: StepOutcome,
        response: &ApiResponse,
        assertions: Vec<AssertionResult>,
        detail: Option<String>,
    ) {
        self.steps.push(StepRecord {
            name: step.to_string(),
            outcome,
            status: Some(response.status),
            duration_ms: response.duration_ms,
            assertions,
            detail,
        });
    }
}

fn excerpt(body: &str) -> String {
    if body.is_empty() {
        return "<empty>".to_string();
    }
    if body.len() <= MAX_BODY_EXCERPT {
        return body.to_string();
    }
    let mut end = MAX_BODY_EXCERPT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes)", &body[..end], body.len())
}
