//! Prediction result type.

use serde::Deserialize;

/// A ranked TLD candidate from the prediction service.
///
/// The service returns candidates sorted by descending score; the client
/// preserves that order and never re-ranks or filters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub tld: String,
    /// Model confidence in `[0, 1]` as reported by the service.
    pub score: f64,
}
