//! Quiz endpoint
//!
//! `POST /quizzes` picks a random question the player has not seen yet,
//! optionally restricted to one category.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::{choose, method_not_allowed};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::models::{lenient_int, stored_category_id, Question};
use crate::state::AppState;
use crate::store::TriviaStore;

/// Quiz round request
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    /// Ids already shown; non-integer entries never match. Only a
    /// missing key means "none"; an explicit `null` is rejected.
    #[serde(default = "no_previous_questions")]
    pub previous_questions: Value,
    /// `{id, type}` with a client-facing id; falsy values mean "all"
    #[serde(default)]
    pub quiz_category: Option<Value>,
}

fn no_previous_questions() -> Value {
    Value::Array(Vec::new())
}

/// Quiz round response; `question` is `false` once the pool is exhausted
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(serialize_with = "question_or_false")]
    pub question: Option<Question>,
}

fn question_or_false<S>(question: &Option<Question>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match question {
        Some(q) => q.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

/// JSON truthiness: null, false, zero and empty values are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Integer ids from `previous_questions`; `None` when it is not a list.
fn previous_ids(value: &Value) -> Option<Vec<i64>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter(|v| v.is_number())
                .filter_map(lenient_int)
                .collect(),
        ),
        _ => None,
    }
}

/// POST /quizzes
///
/// Every failure inside the selection, the unprocessable "nothing stored
/// for this category" case included, is reported as 400.
async fn next_question(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let question = select_question(state.store(), &req)
        .await
        .map_err(|e| ApiError::BadRequest.because(e))?;

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

async fn select_question(
    store: &dyn TriviaStore,
    req: &QuizRequest,
) -> Result<Option<Question>, ApiError> {
    let previous = previous_ids(&req.previous_questions).ok_or(ApiError::BadRequest)?;

    let pool = match req.quiz_category.as_ref().filter(|v| is_truthy(v)) {
        Some(category) => {
            let client_id = category
                .get("id")
                .and_then(lenient_int)
                .ok_or(ApiError::BadRequest)?;
            let stored = stored_category_id(client_id).ok_or(ApiError::BadRequest)?;
            store.questions_in_category(stored).await
        }
        None => store.questions().await,
    }
    .map_err(|e| ApiError::BadRequest.because(e))?;

    if pool.is_empty() {
        return Err(ApiError::Unprocessable);
    }

    let remaining: Vec<Question> = pool
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    tracing::debug!(
        seen = previous.len(),
        remaining = remaining.len(),
        "selecting quiz question"
    );

    Ok(choose(&remaining).cloned())
}

/// Quiz routes
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/quizzes",
        post(next_question).fallback(method_not_allowed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn request(body: Value) -> QuizRequest {
        serde_json::from_value(body).unwrap()
    }

    fn store() -> MemoryStore {
        let question = |id, category| Question {
            id,
            question: format!("Question {}", id),
            answer: format!("Answer {}", id),
            category,
            difficulty: 1,
        };
        MemoryStore::from_rows(
            vec![Category::new(1, "Science"), Category::new(2, "Art")],
            vec![question(1, 1), question(2, 1), question(3, 2)],
        )
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!({})));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!({ "id": 0 })));
        assert!(is_truthy(&json!("x")));
    }

    #[test]
    fn previous_ids_keep_only_numbers() {
        let ids = previous_ids(&json!([1, "2", { "id": 3 }, 4.0])).unwrap();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(previous_ids(&no_previous_questions()), Some(vec![]));
        assert_eq!(previous_ids(&json!("1,2")), None);
        assert_eq!(previous_ids(&json!(null)), None);
    }

    #[tokio::test]
    async fn category_zero_selects_first_stored_category() {
        let store = store();
        let req = request(json!({ "quiz_category": { "type": "Science", "id": 0 } }));

        let picked = select_question(&store, &req).await.unwrap().unwrap();
        assert_eq!(picked.category, 1);
    }

    #[tokio::test]
    async fn excludes_previous_questions() {
        let store = store();
        let req = request(json!({
            "previous_questions": [1],
            "quiz_category": { "type": "Science", "id": "0" },
        }));

        for _ in 0..20 {
            let picked = select_question(&store, &req).await.unwrap().unwrap();
            assert_eq!(picked.id, 2);
        }
    }

    #[tokio::test]
    async fn exhausted_category_yields_none() {
        let store = store();
        let req = request(json!({
            "previous_questions": [1, 2],
            "quiz_category": { "id": 0 },
        }));

        assert_eq!(select_question(&store, &req).await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_category_is_unprocessable() {
        let store = store();
        let req = request(json!({ "quiz_category": { "id": 7 } }));

        let err = select_question(&store, &req).await.unwrap_err();
        assert_eq!(err, ApiError::Unprocessable);
    }

    #[tokio::test]
    async fn missing_category_id_is_bad_request() {
        let store = store();
        let req = request(json!({ "quiz_category": { "type": "Art" } }));

        let err = select_question(&store, &req).await.unwrap_err();
        assert_eq!(err, ApiError::BadRequest);
    }

    #[tokio::test]
    async fn null_history_is_bad_request() {
        let store = store();
        let req = request(json!({ "previous_questions": null }));

        let err = select_question(&store, &req).await.unwrap_err();
        assert_eq!(err, ApiError::BadRequest);
    }

    #[tokio::test]
    async fn no_category_draws_from_everything() {
        let store = store();
        let req = request(json!({ "previous_questions": [1, 2] }));

        let picked = select_question(&store, &req).await.unwrap().unwrap();
        assert_eq!(picked.id, 3);
    }

    #[test]
    fn exhausted_serializes_as_false() {
        let body = serde_json::to_value(QuizResponse {
            success: true,
            question: None,
        })
        .unwrap();
        assert_eq!(body, json!({ "success": true, "question": false }));
    }
}
