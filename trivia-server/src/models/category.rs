//! Question categories

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category record, serialized as `{id, type}`
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: i64, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// Translate a client-facing category id into the stored category value.
///
/// Clients count categories from 0 while stored ids start at 1. Returns
/// `None` only on overflow.
pub fn stored_category_id(client_id: i64) -> Option<i64> {
    client_id.checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_kind_as_type() {
        let value = serde_json::to_value(Category::new(1, "Science")).unwrap();
        assert_eq!(value, serde_json::json!({ "id": 1, "type": "Science" }));
    }

    #[test]
    fn client_ids_are_shifted_by_one() {
        assert_eq!(stored_category_id(0), Some(1));
        assert_eq!(stored_category_id(2), Some(3));
        assert_eq!(stored_category_id(i64::MAX), None);
    }
}
