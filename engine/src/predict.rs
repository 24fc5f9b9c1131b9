//! One-shot prediction request controller.
//!
//! Consolidates the two source screens (free-text category vs server-fed
//! selector) into one controller; [`crate::config::CategoryInputMode`]
//! decides whether the category list is loaded at startup.

use tldq_api::{ApiClient, ApiError};
use tldq_types::Prediction;

/// Ties an in-flight predict call to the submission that issued it; stale
/// results are discarded in [`PredictionSession::finish_predict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a ticket that is never finished leaves the session loading"]
pub struct PredictTicket(u64);

#[derive(Debug, Default)]
pub struct PredictionSession {
    base_name: String,
    category_hint: String,
    use_category: bool,
    categories: Vec<String>,
    categories_loading: bool,
    categories_loaded: bool,
    predictions: Vec<Prediction>,
    loading: bool,
    predict_seq: u64,
}

impl PredictionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_base_name(&mut self, value: impl Into<String>) {
        self.base_name = value.into();
    }

    pub fn set_category_hint(&mut self, value: impl Into<String>) {
        self.category_hint = value.into();
    }

    /// Opt in or out of sending the category hint. When off, the hint is
    /// submitted as the empty string (the service's "unknown"), never
    /// omitted from the request body.
    pub fn set_use_category(&mut self, enabled: bool) {
        self.use_category = enabled;
    }

    /// Fetch the category list once per session. A failure leaves the list
    /// empty for the rest of the session and never blocks prediction.
    pub async fn load_categories(&mut self, client: &ApiClient) {
        if self.categories_loaded || self.categories_loading {
            return;
        }
        self.categories_loading = true;
        match client.fetch_categories().await {
            Ok(list) => self.categories = list,
            Err(error) => {
                tracing::warn!(%error, "category fetch failed; selector stays empty");
            }
        }
        self.categories_loading = false;
        self.categories_loaded = true;
    }

    /// Start a predict call, or `None` when the base name is empty after
    /// trimming — invalid input is rejected silently, with zero network
    /// calls issued.
    pub fn begin_predict(&mut self) -> Option<PredictTicket> {
        if self.base_name.trim().is_empty() {
            return None;
        }
        self.predict_seq += 1;
        self.loading = true;
        Some(PredictTicket(self.predict_seq))
    }

    /// Install a predict result, unless a newer submission superseded it.
    ///
    /// A failure degrades to an empty result set: the UI renders "no
    /// predictions" for failures and genuinely empty answers alike.
    pub fn finish_predict(
        &mut self,
        ticket: PredictTicket,
        result: Result<Vec<Prediction>, ApiError>,
    ) {
        if ticket.0 != self.predict_seq {
            tracing::debug!(
                stale = ticket.0,
                current = self.predict_seq,
                "discarding superseded prediction"
            );
            return;
        }
        self.loading = false;
        match result {
            Ok(predictions) => self.predictions = predictions,
            Err(error) => {
                tracing::warn!(%error, "predict request failed");
                self.predictions.clear();
            }
        }
    }

    /// Submit the current input. Returns `false` when the input was invalid
    /// and no request was sent.
    pub async fn submit(&mut self, client: &ApiClient) -> bool {
        let Some(ticket) = self.begin_predict() else {
            return false;
        };
        let base_name = self.base_name.trim().to_string();
        let hint = self.effective_hint().to_string();
        let result = client.predict(&base_name, &hint).await;
        self.finish_predict(ticket, result);
        true
    }

    /// The hint as it goes on the wire: empty unless the caller opted in.
    #[must_use]
    pub fn effective_hint(&self) -> &str {
        if self.use_category {
            self.category_hint.trim()
        } else {
            ""
        }
    }

    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Category names fetched from the service, empty until loaded (and
    /// permanently empty for the session when the fetch failed).
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn categories_loading(&self) -> bool {
        self.categories_loading
    }

    /// Last result set, in the service's ranking order. Empty before the
    /// first request and after any failure.
    #[must_use]
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
