//! Login/signup submission and token handoff.

use tldq_api::{ApiClient, ApiError};
use tldq_types::AuthMode;

use crate::store::TokenStore;

const VALIDATION_MESSAGE: &str = "email and password required";
/// Shown for failures that never reached the server, so callers can tell
/// them apart from server-rejected credentials.
const NETWORK_ERROR_MESSAGE: &str = "network error";

/// Auth controller: validates input, dispatches to login or signup by mode,
/// and hands a received token to the injected [`TokenStore`]. The password
/// never outlives a successful submission.
pub struct AuthSession {
    mode: AuthMode,
    email: String,
    password: String,
    error: Option<String>,
    store: Box<dyn TokenStore>,
}

impl AuthSession {
    #[must_use]
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        Self {
            mode: AuthMode::default(),
            email: String::new(),
            password: String::new(),
            error: None,
            store,
        }
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the current credentials. Returns `true` when a token was
    /// received and stored. Both fields are required; an invalid form sets a
    /// local validation error and sends nothing.
    pub async fn submit(&mut self, client: &ApiClient) -> bool {
        if !self.validate() {
            return false;
        }
        let result = match self.mode {
            AuthMode::Login => client.login(&self.email, &self.password).await,
            AuthMode::Signup => client.signup(&self.email, &self.password).await,
        };
        self.apply_result(result)
    }

    /// Clear any prior error and check both fields are present. A failed
    /// check sets a local validation error; no request may be sent.
    fn validate(&mut self) -> bool {
        self.error = None;
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some(VALIDATION_MESSAGE.to_string());
            return false;
        }
        true
    }

    /// Install the outcome of an auth request. Server-supplied messages are
    /// surfaced verbatim; transport and malformed responses collapse into a
    /// generic network error.
    fn apply_result(&mut self, result: Result<String, ApiError>) -> bool {
        match result {
            Ok(token) => {
                if let Err(error) = self.store.save(&token) {
                    tracing::warn!(%error, "failed to persist auth token");
                }
                self.email.clear();
                self.password.clear();
                true
            }
            Err(ApiError::Server { message, .. }) => {
                self.error = Some(message);
                false
            }
            Err(error) => {
                tracing::warn!(%error, mode = %self.mode, "auth request failed");
                self.error = Some(NETWORK_ERROR_MESSAGE.to_string());
                false
            }
        }
    }
}
