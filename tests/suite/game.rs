//! End-to-end game session flow against a mock service.

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use tldq_engine::{GameSession, GuessOutcome, RoundPhase};

use crate::common::{client_for, github_question, mount_question, start_service_mock};

#[tokio::test]
async fn full_round_fetch_guess_next() {
    let server = start_service_mock().await;
    mount_question(&server, github_question()).await;
    let client = client_for(&server);

    let mut session = GameSession::new();
    session.advance(&client).await;

    let question = session.question().expect("question should be installed");
    assert_eq!(question.domain(), "github");
    assert_eq!(question.options(), &["com", "io", "dev"]);

    assert_eq!(session.submit_guess("com"), GuessOutcome::Correct);
    assert_eq!(session.score(), 10);
    assert_eq!(session.streak(), 1);
    assert_eq!(session.feedback(), Some("Correct!"));

    // Already answered: further guesses change nothing.
    assert_eq!(session.submit_guess("io"), GuessOutcome::Rejected);
    assert_eq!(session.score(), 10);
    assert_eq!(session.streak(), 1);

    // Next round clears selection and feedback but keeps the totals.
    session.advance(&client).await;
    assert!(session.selected().is_none());
    assert!(session.feedback().is_none());
    assert_eq!(session.score(), 10);
    assert_eq!(session.streak(), 1);
    assert!(session.question().is_some());
}

#[tokio::test]
async fn wrong_guess_names_the_answer_and_resets_streak() {
    let server = start_service_mock().await;
    mount_question(&server, github_question()).await;
    let client = client_for(&server);

    let mut session = GameSession::new();
    session.advance(&client).await;

    let outcome = session.submit_guess("io");
    assert_eq!(
        outcome,
        GuessOutcome::Incorrect {
            answer: "com".to_string()
        }
    );
    assert_eq!(session.feedback(), Some("Wrong! The correct TLD was .com"));
    assert_eq!(session.score(), 0);
    assert_eq!(session.streak(), 0);
}

#[tokio::test]
async fn server_failure_leaves_session_retryable() {
    let server = start_service_mock().await;
    Mock::given(method("GET"))
        .and(path("/api/question"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut session = GameSession::new();
    session.advance(&client).await;

    assert!(matches!(session.phase(), RoundPhase::Failed(_)));
    assert!(session.question().is_none());
    assert!(!session.is_loading());
    assert_eq!(
        session.feedback(),
        Some("Could not load question. Is the backend running?")
    );
    assert_eq!(session.submit_guess("com"), GuessOutcome::Rejected);
}

#[tokio::test]
async fn contract_violating_payload_degrades_like_a_failure() {
    let server = start_service_mock().await;
    // Answer outside the option set: the client must not trust it.
    mount_question(
        &server,
        serde_json::json!({
            "domain": "github",
            "category": "tech",
            "options": ["com", "io"],
            "answer": "net",
        }),
    )
    .await;
    let client = client_for(&server);

    let mut session = GameSession::new();
    session.advance(&client).await;
    assert!(matches!(session.phase(), RoundPhase::Failed(_)));
}

#[tokio::test]
async fn fresh_session_does_not_inherit_score() {
    let server = start_service_mock().await;
    mount_question(&server, github_question()).await;
    let client = client_for(&server);

    let mut session = GameSession::new();
    session.advance(&client).await;
    session.submit_guess("com");
    assert_eq!(session.score(), 10);

    // No persistence: a rebuilt session starts from zero.
    let session = GameSession::new();
    assert_eq!(session.score(), 0);
    assert_eq!(session.streak(), 0);
}
