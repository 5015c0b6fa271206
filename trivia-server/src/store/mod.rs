//! Storage abstraction for questions and categories
//!
//! Handlers receive a [`TriviaStore`] through router state instead of
//! reaching for a global connection. Two implementations exist:
//!
//! - [`PgStore`]: PostgreSQL via a sqlx pool
//! - [`MemoryStore`]: process-local tables, used by tests and `--memory`
//!
//! Every operation touches a single statement; nothing spans a
//! transaction.

pub mod memory;
pub mod postgres;
pub mod seed;

use async_trait::async_trait;

use crate::models::{Category, NewQuestion, Question};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Persistent storage for trivia data.
///
/// Category values passed in and returned here are stored values. Any
/// shift between client-facing and stored category ids happens above
/// this layer.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories ordered by id.
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    /// All questions ordered by id.
    async fn questions(&self) -> Result<Vec<Question>, StoreError>;

    /// A single question by id.
    async fn question(&self, id: i64) -> Result<Option<Question>, StoreError>;

    /// Questions whose stored category equals `category`, ordered by id.
    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, StoreError>;

    /// Case-insensitive substring match against the question text.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError>;

    /// Insert a question and return the stored row.
    async fn insert_question(&self, new: NewQuestion) -> Result<Question, StoreError>;

    /// Delete a question; `NotFound` when no row matched.
    async fn delete_question(&self, id: i64) -> Result<(), StoreError>;
}
