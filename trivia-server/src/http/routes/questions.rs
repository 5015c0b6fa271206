//! Question endpoints
//!
//! - `GET /questions?page=N`: ten questions per page
//! - `POST /questions`: create, or search when the body carries `searchTerm`
//! - `DELETE /questions/{id}`

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{choose, method_not_allowed, Ack};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, QueryParams, QuestionId};
use crate::models::{NewQuestion, Pagination, Question};
use crate::state::AppState;
use crate::store::TriviaStore;

/// `GET /questions` response
#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    /// Count of every stored question, not just this page
    pub total_questions: usize,
    /// Random category label, unrelated to the listed questions
    pub current_category: String,
    pub categories: Vec<String>,
}

/// Search branch of `POST /questions`
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    /// Stored category of each match, one entry per match
    pub current_category: Vec<i64>,
}

/// First value of a repeated query key; later repeats are ignored.
fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// GET /questions
async fn list_questions(
    State(state): State<AppState>,
    QueryParams(pairs): QueryParams<Vec<(String, String)>>,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let page = Pagination::from_query(first_value(&pairs, "page"));
    let store = state.store();

    let questions = store
        .questions()
        .await
        .map_err(|e| ApiError::NotFound.because(e))?;

    let slice = page.slice(&questions);
    if slice.is_empty() {
        tracing::debug!(page = page.page, total = questions.len(), "page out of range");
        return Err(ApiError::NotFound);
    }

    let categories: Vec<String> = store
        .categories()
        .await
        .map_err(|e| ApiError::NotFound.because(e))?
        .into_iter()
        .map(|c| c.kind)
        .collect();

    let current_category = choose(&categories)
        .cloned()
        .ok_or_else(|| ApiError::NotFound.because("no categories to choose from"))?;

    Ok(Json(QuestionPageResponse {
        success: true,
        questions: slice.to_vec(),
        total_questions: questions.len(),
        current_category,
        categories,
    }))
}

/// POST /questions
///
/// A `searchTerm` key (other than `null`) selects search; an empty string
/// still searches. Anything else is a create request.
async fn create_or_search(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Response, ApiError> {
    let Value::Object(fields) = body else {
        return Err(ApiError::BadRequest.because("request body is not a JSON object"));
    };

    let term = match fields.get("searchTerm") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };

    match term {
        None => {
            let ack = create_question(state.store(), fields).await?;
            Ok(Json(ack).into_response())
        }
        Some(term) => {
            let found = search_questions(state.store(), &term).await?;
            Ok(Json(found).into_response())
        }
    }
}

async fn create_question(
    store: &dyn TriviaStore,
    fields: Map<String, Value>,
) -> Result<Ack, ApiError> {
    let new: NewQuestion = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::BadRequest.because(e))?;

    let created = store
        .insert_question(new)
        .await
        .map_err(|e| ApiError::BadRequest.because(e))?;

    tracing::info!(id = created.id, category = created.category, "question created");
    Ok(Ack::ok())
}

async fn search_questions(store: &dyn TriviaStore, term: &str) -> Result<SearchResponse, ApiError> {
    let questions = store
        .search_questions(term)
        .await
        .map_err(|e| ApiError::NotFound.because(e))?;

    if questions.is_empty() {
        tracing::debug!(term, "search matched nothing");
        return Err(ApiError::NotFound);
    }

    Ok(SearchResponse {
        success: true,
        total_questions: questions.len(),
        current_category: questions.iter().map(|q| q.category).collect(),
        questions,
    })
}

/// DELETE /questions/{id}
///
/// Every failure, a missing row included, is reported as 422.
async fn delete_question(
    State(state): State<AppState>,
    QuestionId(id): QuestionId,
) -> Result<Json<Ack>, ApiError> {
    remove_question(state.store(), id)
        .await
        .map_err(|e| ApiError::Unprocessable.because(e))?;

    tracing::info!(id, "question deleted");
    Ok(Json(Ack::ok()))
}

async fn remove_question(store: &dyn TriviaStore, id: i64) -> Result<(), ApiError> {
    let existing = store
        .question(id)
        .await
        .map_err(|e| ApiError::NotFound.because(e))?;

    if existing.is_none() {
        return Err(ApiError::NotFound);
    }

    store
        .delete_question(id)
        .await
        .map_err(|e| ApiError::NotFound.because(e))
}

/// Question routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/questions",
            get(list_questions)
                .post(create_or_search)
                .fallback(method_not_allowed),
        )
        .route(
            "/questions/{id}",
            delete(delete_question).fallback(method_not_allowed),
        )
}
