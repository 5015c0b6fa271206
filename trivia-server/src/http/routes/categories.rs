//! Category endpoints
//!
//! - `GET /categories`: id → label mapping
//! - `GET /categories/{id}/questions`: questions of one category, with
//!   the client id shifted onto the stored id

use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::method_not_allowed;
use crate::http::error::ApiError;
use crate::http::extractors::CategoryId;
use crate::models::{stored_category_id, Question};
use crate::state::AppState;

/// `GET /categories` response
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<i64, String>,
}

/// `GET /categories/{id}/questions` response
#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    /// The client-facing id from the path, not the stored one
    pub current_category: i64,
    pub total_questions: usize,
    pub questions: Vec<Question>,
}

/// GET /categories
async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state
        .store()
        .categories()
        .await
        .map_err(|e| ApiError::NotFound.because(e))?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories: categories.into_iter().map(|c| (c.id, c.kind)).collect(),
    }))
}

/// GET /categories/{id}/questions
async fn questions_by_category(
    State(state): State<AppState>,
    CategoryId(category_id): CategoryId,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let stored = stored_category_id(category_id).ok_or(ApiError::NotFound)?;

    let questions = state
        .store()
        .questions_in_category(stored)
        .await
        .map_err(|e| ApiError::NotFound.because(e))?;

    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        current_category: category_id,
        total_questions: questions.len(),
        questions,
    }))
}

/// Category routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(list_categories).fallback(method_not_allowed),
        )
        .route(
            "/categories/{id}/questions",
            get(questions_by_category).fallback(method_not_allowed),
        )
}
