//! Service wrappers against a local mock of the pet-store API: request shape
//! on the wire and raw pass-through of whatever the server answers.

use std::path::PathBuf;

use petstore_suite::config::SuiteConfig;
use petstore_suite::factories::{self, OrderPatch, PetPatch};
use petstore_suite::http::ApiClient;
use petstore_suite::models::{Pet, PetStatus};
use petstore_suite::services::{PetService, StoreService, UploadImage, UserService};
use petstore_suite::SuiteError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string, body_string_contains, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SuiteConfig {
    SuiteConfig {
        base_url: format!("{}/v2", server.uri()),
        ..SuiteConfig::default()
    }
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::from_config(&config_for(server)).unwrap()
}

#[tokio::test]
async fn create_pet_posts_camel_case_json() {
    let server = MockServer::start().await;
    let pet = factories::pet::build(PetPatch::named("Buddy").status(PetStatus::Available));

    Mock::given(method("POST"))
        .and(path("/v2/pet"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "id": pet.id,
            "name": "Buddy",
            "photoUrls": [factories::pet::PLACEHOLDER_PHOTO_URL],
            "status": "available",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&pet))
        .expect(1)
        .mount(&server)
        .await;

    let response = PetService::new(client_for(&server)).create(&pet).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.json::<Pet>().unwrap(), pet);
}

#[tokio::test]
async fn error_statuses_are_plain_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pet/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 1,
            "type": "error",
            "message": "Pet not found",
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/pet/42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let pets = PetService::new(client_for(&server));
    let response = pets.get(42).await.unwrap();
    assert_eq!(response.status, 404);
    assert!(response.body.contains("Pet not found"));
    assert!(!response.is_success());

    let response = pets.delete(42).await.unwrap();
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "boom");
}

#[tokio::test]
async fn find_by_status_joins_filters_with_commas() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pet/findByStatus"))
        .and(query_param("status", "available,sold"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let response = PetService::new(client_for(&server))
        .find_by_status(&[PetStatus::Available, PetStatus::Sold])
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn form_update_sends_only_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pet/7"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("name=Max"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = PetService::new(client_for(&server))
        .update_with_form(7, Some("Max"), None)
        .await
        .unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn upload_of_missing_file_sends_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/pet/7/uploadImage"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("placeholder image content"))
        .and(body_string_contains("filename=\"does-not-exist.png\""))
        .and(body_string_contains("name=\"additionalMetadata\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "type": "unknown",
            "message": "File uploaded to ./does-not-exist.png, 25 bytes",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upload = UploadImage {
        file: Some(PathBuf::from("no/such/dir/does-not-exist.png")),
        additional_metadata: Some("from test".to_string()),
    };
    let response = PetService::new(client_for(&server)).upload_image(7, &upload).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn upload_reads_existing_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("photo.jpg");
    std::fs::write(&file, b"real jpeg bytes").unwrap();

    Mock::given(method("POST"))
        .and(path("/v2/pet/9/uploadImage"))
        .and(body_string_contains("real jpeg bytes"))
        .and(body_string_contains("image/jpeg"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let upload = UploadImage {
        file: Some(file),
        additional_metadata: None,
    };
    let response = PetService::new(client_for(&server)).upload_image(9, &upload).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn store_order_round_trip() {
    let server = MockServer::start().await;
    let order = factories::order::build(OrderPatch {
        pet_id: Some(123),
        quantity: Some(2),
        ..OrderPatch::default()
    });

    Mock::given(method("POST"))
        .and(path("/v2/store/order"))
        .and(body_partial_json(json!({"petId": 123, "quantity": 2, "status": "placed", "complete": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&order))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/store/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"available": 3, "sold": 1})))
        .mount(&server)
        .await;

    let store = StoreService::new(client_for(&server));
    let response = store.place_order(&order).await.unwrap();
    assert_eq!(response.status, 200);

    let inventory: petstore_suite::models::Inventory = store.inventory().await.unwrap().json().unwrap();
    assert_eq!(inventory.get("available"), Some(&3));
}

#[tokio::test]
async fn login_encodes_credentials_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/user/login"))
        .and(query_param("username", "john doe"))
        .and(query_param("password", "p&ss=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "type": "unknown",
            "message": "logged in user session:1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = UserService::new(client_for(&server))
        .login("john doe", "p&ss=1")
        .await
        .unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn bulk_create_sends_a_json_array() {
    let server = MockServer::start().await;
    let users = factories::user::batch(2);
    Mock::given(method("POST"))
        .and(path("/v2/user/createWithList"))
        .and(body_partial_json(json!([
            {"username": users[0].username},
            {"username": users[1].username},
        ])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = UserService::new(client_for(&server))
        .create_with_list(&users)
        .await
        .unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn api_key_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/user/logout"))
        .and(header("api_key", "special-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = SuiteConfig {
        api_key: Some("special-key".to_string()),
        ..config_for(&server)
    };
    let response = UserService::new(ApiClient::from_config(&config).unwrap())
        .logout()
        .await
        .unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn slow_responses_become_transport_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/store/inventory"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = SuiteConfig {
        timeout_ms: 50,
        ..config_for(&server)
    };
    let err = StoreService::new(ApiClient::from_config(&config).unwrap())
        .inventory()
        .await
        .unwrap_err();
    assert!(matches!(err, SuiteError::Transport { .. }), "{err}");
}

#[tokio::test]
async fn dot_usernames_are_refused_before_sending() {
    let server = MockServer::start().await;
    let users = UserService::new(client_for(&server));

    let err = users.delete("..").await.unwrap_err();
    assert!(matches!(err, SuiteError::InvalidUrl { .. }), "{err}");
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
