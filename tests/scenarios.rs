//! Catalog scenarios run through the real runner against a local mock backend,
//! covering conforming, deviating and broken server behaviour.

use std::time::Duration;

use petstore_suite::config::SuiteConfig;
use petstore_suite::http::ApiClient;
use petstore_suite::scenarios;
use petstore_suite::storage;
use petstore_suite::testing::{RunReport, RunSettings, Runner, ScenarioOutcome, StepOutcome};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers with the request body, the way the backend echoes created resources.
struct Echo;

impl Respond for Echo {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(request.body.clone(), "application/json")
    }
}

fn settings() -> RunSettings {
    RunSettings {
        workers: 4,
        retries: 0,
        scenario_timeout: Duration::from_secs(10),
        response_budget: Duration::from_secs(2),
        strict: false,
    }
}

fn config_for(server: &MockServer) -> SuiteConfig {
    SuiteConfig {
        base_url: format!("{}/v2", server.uri()),
        ..SuiteConfig::default()
    }
}

async fn run(server: &MockServer, names: &[&str], settings: RunSettings) -> RunReport {
    run_with(config_for(server), names, settings).await
}

async fn run_with(config: SuiteConfig, names: &[&str], settings: RunSettings) -> RunReport {
    let client = ApiClient::from_config(&config).unwrap();
    let patterns: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let selected = scenarios::filter(&scenarios::catalog(), &patterns);
    assert_eq!(selected.len(), names.len(), "filter picked {selected:?}");
    Runner::new(client, settings).run(&selected).await
}

async fn deletes_sent(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.method.as_str() == "DELETE")
        .count()
}

async fn mock_missing_pet(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/v2/pet/999999999"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "code": 1,
            "type": "error",
            "message": "Pet not found",
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn missing_pet_with_documented_404_passes() {
    let server = MockServer::start().await;
    mock_missing_pet(&server, 404).await;

    let report = run(&server, &["get_missing_pet"], settings()).await;
    assert_eq!(report.scenarios[0].outcome, ScenarioOutcome::Passed);
    assert!(report.is_success());
}

#[tokio::test]
async fn missing_pet_answering_200_is_a_reported_deviation() {
    let server = MockServer::start().await;
    mock_missing_pet(&server, 200).await;

    let report = run(&server, &["get_missing_pet"], settings()).await;
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, ScenarioOutcome::Deviated);
    assert_eq!(scenario.deviations(), ["missing-pet-found"]);
    assert_eq!(report.deviated, 1);
    assert!(report.is_success());
    assert!(report.summary_text().contains("known deviation: missing-pet-found"));

    let strict = run(&server, &["get_missing_pet"], RunSettings { strict: true, ..settings() }).await;
    assert!(!strict.is_success());
}

#[tokio::test]
async fn missing_pet_answering_500_fails_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pet/999999999"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let report = run(&server, &["get_missing_pet"], settings()).await;
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, ScenarioOutcome::Failed);
    let error = scenario.error.as_deref().unwrap();
    assert!(error.contains("step `get missing pet` failed"), "{error}");
    assert!(error.contains("got 500"), "{error}");
    assert!(error.contains("upstream exploded"), "{error}");
    assert!(!report.is_success());
}

#[tokio::test]
async fn pet_crud_lifecycle_against_a_conforming_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).and(path("/v2/pet")).respond_with(Echo).mount(&server).await;
    Mock::given(method("PUT")).and(path("/v2/pet")).respond_with(Echo).mount(&server).await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/v2/pet/\d+$"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v2/pet/\d+$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let report = run(&server, &["pet_crud_lifecycle"], settings()).await;
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, ScenarioOutcome::Passed, "{:?}", scenario.error);

    let steps: Vec<_> = scenario.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(steps, ["create pet", "update pet", "delete pet", "get deleted pet"]);
    assert!(scenario.steps.iter().all(|s| s.outcome == StepOutcome::Passed));

    // Explicit delete plus the deferred cleanup.
    assert_eq!(deletes_sent(&server).await, 2);
}

#[tokio::test]
async fn rejected_create_owes_no_cleanup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pet"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = run(&server, &["pet_crud_lifecycle"], settings()).await;
    assert_eq!(report.scenarios[0].outcome, ScenarioOutcome::Failed);
    assert_eq!(deletes_sent(&server).await, 0);
}

#[tokio::test]
async fn create_lost_in_transport_owes_no_cleanup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/store/order"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = SuiteConfig {
        timeout_ms: 50,
        ..config_for(&server)
    };
    let report = run_with(config, &["place_order"], settings()).await;
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, ScenarioOutcome::Failed);
    assert!(scenario.error.as_deref().unwrap().contains("POST"), "{:?}", scenario.error);
    assert_eq!(deletes_sent(&server).await, 0);
}

#[tokio::test]
async fn minimal_user_lifecycle_accepts_either_delete_status() {
    for delete_status in [200u16, 404] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "type": "unknown",
                "message": "1",
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/v2/user/.+$"))
            .respond_with(ResponseTemplate::new(delete_status))
            .mount(&server)
            .await;

        let report = run(&server, &["minimal_user_lifecycle"], settings()).await;
        let scenario = &report.scenarios[0];
        assert_eq!(scenario.outcome, ScenarioOutcome::Passed, "{delete_status}: {:?}", scenario.error);
        assert_eq!(scenario.steps.last().unwrap().status, Some(delete_status));
    }
}

#[tokio::test]
async fn second_delete_may_answer_404() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).and(path("/v2/pet")).respond_with(Echo).mount(&server).await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/v2/pet/\d+$"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/v2/pet/\d+$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let report = run(&server, &["delete_pet_twice"], settings()).await;
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, ScenarioOutcome::Passed, "{:?}", scenario.error);
    let statuses: Vec<_> = scenario.steps.iter().map(|s| s.status).collect();
    assert_eq!(statuses, [Some(200), Some(200), Some(404)]);
}

#[tokio::test]
async fn empty_bulk_create_may_be_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v2/user/createWith(Array|List)$"))
        .respond_with(ResponseTemplate::new(400))
        .expect(2)
        .mount(&server)
        .await;

    let report = run(&server, &["create_users_with_empty_list"], settings()).await;
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, ScenarioOutcome::Passed, "{:?}", scenario.error);
    assert_eq!(scenario.steps.len(), 2);
}

#[tokio::test]
async fn deleting_a_missing_user_with_200_is_a_reported_deviation() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/v2/user/.+$"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = run(&server, &["delete_missing_user"], settings()).await;
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, ScenarioOutcome::Deviated, "{:?}", scenario.error);
    assert_eq!(scenario.deviations(), ["delete-missing-returns-success"]);
}

#[tokio::test]
async fn text_file_upload_accepted_as_image_is_a_reported_deviation() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).and(path("/v2/pet")).respond_with(Echo).mount(&server).await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v2/pet/\d+/uploadImage$"))
        .and(body_string_contains("filename=\"document.txt\""))
        .and(body_string_contains("text/plain"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = run(&server, &["upload_image_wrong_file_type"], settings()).await;
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, ScenarioOutcome::Deviated, "{:?}", scenario.error);
    assert_eq!(scenario.deviations(), ["upload-accepts-any-file-type"]);
}

#[tokio::test]
async fn place_order_reports_read_after_write_deviation() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).and(path("/v2/store/order")).respond_with(Echo).mount(&server).await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v2/store/order/\d+$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/v2/store/order/\d+$"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = run(&server, &["place_order"], settings()).await;
    let scenario = &report.scenarios[0];
    assert_eq!(scenario.outcome, ScenarioOutcome::Deviated, "{:?}", scenario.error);
    assert_eq!(scenario.deviations(), ["read-after-write"]);
    assert_eq!(scenario.steps[0].name, "place order");
    assert_eq!(scenario.steps[0].status, Some(200));
}

#[tokio::test]
async fn xss_names_are_echoed_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).and(path("/v2/pet")).respond_with(Echo).mount(&server).await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/v2/pet/\d+$"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = run(&server, &["xss_in_pet_name"], settings()).await;
    assert_eq!(report.scenarios[0].outcome, ScenarioOutcome::Passed, "{:?}", report.scenarios[0].error);
    assert_eq!(deletes_sent(&server).await, petstore_suite::probes::XSS_PAYLOADS.len());
}

#[tokio::test]
async fn timed_out_scenarios_skip_cleanup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pet"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let settings = RunSettings {
        scenario_timeout: Duration::from_millis(200),
        ..settings()
    };
    let report = run(&server, &["pet_crud_lifecycle"], settings).await;
    assert_eq!(report.scenarios[0].outcome, ScenarioOutcome::TimedOut);
    assert_eq!(report.failed, 1);
    assert_eq!(deletes_sent(&server).await, 0);
}

#[tokio::test]
async fn unreachable_backend_fails_every_scenario_in_order() {
    let config = SuiteConfig {
        base_url: "http://127.0.0.1:1/v2".to_string(),
        ..SuiteConfig::default()
    };
    let client = ApiClient::from_config(&config).unwrap();
    let catalog = scenarios::catalog();

    let report = Runner::new(client, settings()).run(&catalog).await;
    assert_eq!(report.total, catalog.len());
    assert_eq!(report.failed, catalog.len());
    let names: Vec<_> = report.scenarios.iter().map(|s| s.name.as_str()).collect();
    let expected: Vec<_> = catalog.iter().map(|s| s.name).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn report_survives_a_round_trip_to_disk() {
    let server = MockServer::start().await;
    mock_missing_pet(&server, 200).await;
    let report = run(&server, &["get_missing_pet"], settings()).await;

    let dir = tempfile::tempdir().unwrap();
    let file = storage::write_report(dir.path(), &report).unwrap();
    let loaded = storage::load_report(&file).unwrap();
    assert_eq!(loaded, report);
}
