//! HTTP client for the TLD scoring/prediction service.
//!
//! # Architecture
//!
//! [`ApiClient`] is a stateless request/response mapper: every operation
//! resolves to `Result<_, ApiError>`. Transport faults, non-2xx statuses,
//! and undecodable bodies are normalized into the same error taxonomy and
//! never escape as panics, so callers can hold a single recovery policy.
//!
//! # Error Handling
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Transport` | No usable response: network, DNS, timeout, body read failure |
//! | `Server` | Non-2xx status, with the server-supplied message when the body carried one |
//! | `Malformed` | 2xx response whose body did not decode to the expected shape |
//! | `InvalidQuestion` | 2xx question payload violating the service contract |
//!
//! Non-2xx auth responses are still parsed as JSON to recover the
//! `{message}` or `{error}` field; only when that fails does the client fall
//! back to a generic "login failed" / "signup failed" message.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use url::Url;

use tldq_types::{AuthMode, Prediction, Question, RawQuestion};

pub use reqwest::StatusCode;

const QUESTION_PATH: &str = "/api/question";
const CATEGORIES_PATH: &str = "/api/categories";
const PREDICT_PATH: &str = "/api/predict";
const LOGIN_PATH: &str = "/api/login";
const SIGNUP_PATH: &str = "/api/signup";
const PROFILE_PATH: &str = "/api/profile";

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Overall per-request timeout when the caller does not configure one.
/// The service contract specifies no timeout; an unanswered request is
/// treated as a transport failure once this elapses.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No usable response: network, DNS, timeout, or body read failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-2xx status.
    #[error("server error ({status}): {message}")]
    Server { status: StatusCode, message: String },
    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A 2xx question payload that violates the service contract
    /// (duplicate options, answer outside the option set).
    #[error("invalid question payload: {0}")]
    InvalidQuestion(#[from] tldq_types::QuestionError),
}

impl ApiError {
    /// Whether the request failed before the server produced an answer.
    /// Controllers use this to tell "network error" apart from a
    /// server-rejected request.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Server { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// Error payload shape shared by all service endpoints. Some endpoints use
/// `message`, others `error`; both are accepted.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Debug, Deserialize)]
struct PredictBody {
    predictions: Vec<Prediction>,
}

fn server_error(status: StatusCode, body: &str, fallback: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Server { status, message }
}

fn status_fallback(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

/// Stateless client against a single configured base URL.
///
/// Cheap to clone; all operations take `&self` and are safe to call
/// repeatedly (the service performs no side effects beyond signup/login,
/// which callers must not auto-retry).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Read the body, mapping non-2xx statuses to [`ApiError::Server`] with
    /// the given fallback message.
    async fn read_body(
        response: reqwest::Response,
        fallback: Option<&str>,
    ) -> Result<String, ApiError> {
        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            return Ok(text);
        }
        tracing::warn!(%status, "request rejected by server");
        let fallback = fallback.map_or_else(|| status_fallback(status), str::to_string);
        Err(server_error(status, &text, &fallback))
    }

    /// GET the question endpoint and validate the payload into a [`Question`].
    pub async fn fetch_question(&self) -> Result<Question, ApiError> {
        let response = self.http.get(self.endpoint(QUESTION_PATH)).send().await?;
        let body = Self::read_body(response, None).await?;
        let raw: RawQuestion = serde_json::from_str(&body)?;
        Ok(Question::try_from(raw)?)
    }

    /// GET the list of known category names.
    pub async fn fetch_categories(&self) -> Result<Vec<String>, ApiError> {
        let response = self.http.get(self.endpoint(CATEGORIES_PATH)).send().await?;
        let body = Self::read_body(response, None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a prediction request. An absent category hint must be encoded as
    /// the empty string, never as a missing field — the service treats the
    /// empty string as "unknown".
    pub async fn predict(
        &self,
        base_name: &str,
        category_hint: &str,
    ) -> Result<Vec<Prediction>, ApiError> {
        let response = self
            .http
            .post(self.endpoint(PREDICT_PATH))
            .json(&json!({ "base_name": base_name, "category": category_hint }))
            .send()
            .await?;
        let body = Self::read_body(response, None).await?;
        let decoded: PredictBody = serde_json::from_str(&body)?;
        Ok(decoded.predictions)
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<String, ApiError> {
        self.auth_request(AuthMode::Signup, email, password).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        self.auth_request(AuthMode::Login, email, password).await
    }

    async fn auth_request(
        &self,
        mode: AuthMode,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let (path, fallback) = match mode {
            AuthMode::Login => (LOGIN_PATH, "login failed"),
            AuthMode::Signup => (SIGNUP_PATH, "signup failed"),
        };
        let response = self
            .http
            .post(self.endpoint(path))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body = Self::read_body(response, Some(fallback)).await?;
        let decoded: TokenBody = serde_json::from_str(&body)?;
        Ok(decoded.token)
    }

    /// GET the profile for a stored token. The caller owns the unauthorized
    /// case: a 401 here means the session is no longer valid.
    pub async fn profile(&self, token: &str) -> Result<serde_json::Value, ApiError> {
        let response = self
            .http
            .get(self.endpoint(PROFILE_PATH))
            .bearer_auth(token)
            .send()
            .await?;
        let body = Self::read_body(response, None).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
