//! Shared test utilities and fixtures
//!
//! Wiremock scaffolding for the service endpoints, shared across the
//! end-to-end suites.

#![allow(dead_code)]

use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tldq_api::{ApiClient, DEFAULT_REQUEST_TIMEOUT};

pub async fn start_service_mock() -> MockServer {
    MockServer::start().await
}

pub fn client_for(server: &MockServer) -> ApiClient {
    let base = Url::parse(&server.uri()).unwrap();
    ApiClient::new(base, DEFAULT_REQUEST_TIMEOUT).unwrap()
}

/// Mount a question payload on `/api/question`.
pub async fn mount_question(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/question"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn github_question() -> serde_json::Value {
    serde_json::json!({
        "domain": "github",
        "category": "tech",
        "options": ["com", "io", "dev"],
        "answer": "com",
    })
}

/// Mount a category list on `/api/categories`.
pub async fn mount_categories(server: &MockServer, categories: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(categories)))
        .mount(server)
        .await;
}

/// Mount a predict response on `/api/predict`.
pub async fn mount_predictions(server: &MockServer, predictions: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "predictions": predictions })),
        )
        .mount(server)
        .await;
}
