//! trivia-server: HTTP API for a trivia quiz client
//!
//! Serves questions and categories from a relational store: paginated
//! listing, substring search, per-category listing, create/delete, and
//! random quiz question selection that skips already-seen questions.

pub mod db;
pub mod http;
pub mod models;
pub mod state;
pub mod store;

pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, StoreError, TriviaStore};
