//! Session controllers for the TLD quiz/prediction client.
//!
//! Three controllers drive the UI-facing flows, each owning its own state
//! and recovering locally from every failure:
//!
//! - [`GameSession`] — the question → guess → feedback → next-question cycle
//! - [`PredictionSession`] — one-shot predict calls with a cached category list
//! - [`AuthSession`] — login/signup submission and token handoff
//!
//! Controllers do not share memory; the only shared collaborator is the
//! stateless [`tldq_api::ApiClient`]. Each controller splits its network
//! cycle into a synchronous `begin`/`finish` pair around the await point, so
//! the stale-response guard (only the most recent request for a logical slot
//! may mutate state) is testable without real concurrency.

pub mod auth;
pub mod config;
pub mod game;
pub mod predict;
pub mod store;

pub use auth::AuthSession;
pub use config::{CategoryInputMode, ConfigError, TldqConfig};
pub use game::{FetchTicket, GameSession, GuessOutcome, RoundPhase};
pub use predict::{PredictTicket, PredictionSession};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
