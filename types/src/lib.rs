//! Core domain types for the TLD quiz/prediction client.
//!
//! This crate holds pure data: no IO, no async, no HTTP. The trust boundary
//! with the remote service lives here — wire payloads are deserialized into
//! raw shapes and validated into domain types, so everything downstream can
//! rely on their invariants.

mod auth;
mod prediction;
mod question;

pub use auth::AuthMode;
pub use prediction::Prediction;
pub use question::{Question, QuestionError, RawQuestion};
