//! Route handlers organized by resource

pub mod categories;
pub mod health;
pub mod questions;
pub mod quizzes;

use rand::seq::SliceRandom;
use serde::Serialize;

use super::error::ApiError;

/// Payload-free success envelope
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Method fallback for routes that exist under other methods
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for unknown paths
pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Uniform random pick
pub(crate) fn choose<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::thread_rng())
}
