//! End-to-end prediction flow against a mock service.

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use tldq_engine::PredictionSession;

use crate::common::{client_for, mount_categories, mount_predictions, start_service_mock};

#[tokio::test]
async fn predicts_with_category_hint_when_opted_in() {
    let server = start_service_mock().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .and(body_json(serde_json::json!({
            "base_name": "github",
            "category": "computers",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [
                { "tld": "com", "score": 0.9 },
                { "tld": "io", "score": 0.05 },
            ],
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut session = PredictionSession::new();
    session.set_base_name("  github "); // trimmed before submission
    session.set_use_category(true);
    session.set_category_hint("computers");

    assert!(session.submit(&client).await);
    assert!(!session.is_loading());
    assert_eq!(session.predictions().len(), 2);
    assert_eq!(session.predictions()[0].tld, "com");
    assert_eq!(session.predictions()[1].tld, "io");
}

#[tokio::test]
async fn hint_goes_out_as_empty_string_without_opt_in() {
    let server = start_service_mock().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .and(body_json(serde_json::json!({
            "base_name": "github",
            "category": "",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "predictions": [] })),
        )
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut session = PredictionSession::new();
    session.set_base_name("github");
    session.set_category_hint("computers"); // set but not opted in

    assert!(session.submit(&client).await);
    assert!(session.predictions().is_empty());
}

#[tokio::test]
async fn empty_base_name_issues_zero_network_calls() {
    let server = start_service_mock().await;
    let client = client_for(&server);

    let mut session = PredictionSession::new();
    session.set_base_name("   ");
    assert!(!session.submit(&client).await);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "no request may be sent");
}

#[tokio::test]
async fn category_fetch_failure_does_not_block_prediction() {
    let server = start_service_mock().await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_predictions(
        &server,
        serde_json::json!([{ "tld": "com", "score": 0.7 }]),
    )
    .await;
    let client = client_for(&server);

    let mut session = PredictionSession::new();
    session.load_categories(&client).await;
    assert!(session.categories().is_empty());
    assert!(!session.categories_loading());

    session.set_base_name("github");
    assert!(session.submit(&client).await);
    assert_eq!(session.predictions().len(), 1);
}

#[tokio::test]
async fn categories_are_fetched_once_per_session() {
    let server = start_service_mock().await;
    mount_categories(&server, &["tech", "news"]).await;
    let client = client_for(&server);

    let mut session = PredictionSession::new();
    session.load_categories(&client).await;
    session.load_categories(&client).await;
    assert_eq!(session.categories(), &["tech", "news"]);

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "category list is fetched once");
}

#[tokio::test]
async fn predict_failure_renders_as_no_results() {
    let server = start_service_mock().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut session = PredictionSession::new();
    session.set_base_name("github");
    assert!(session.submit(&client).await);
    assert!(session.predictions().is_empty());
    assert!(!session.is_loading());
}
