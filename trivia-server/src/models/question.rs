//! Trivia questions
//!
//! `Question` is a stored row. `NewQuestion` is the unvalidated input of
//! the create endpoint: every field may be missing, and the store's
//! NOT NULL and foreign-key constraints decide whether it is accepted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Question record, serialized as `{id, question, answer, category, difficulty}`
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Create-question request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "optional_lenient_int")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "optional_lenient_int")]
    pub difficulty: Option<i64>,
}

/// Read an integer from a JSON number or a numeric string.
///
/// Form-driven clients submit select values as strings (`"3"`), so both
/// spellings are accepted. Floats are accepted only when integral.
pub fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn optional_lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => lenient_int(&v)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {}", v))),
    }
}
