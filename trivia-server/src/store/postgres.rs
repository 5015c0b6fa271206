//! PostgreSQL store
//!
//! One statement per operation. Inserts rely on the table constraints
//! (NOT NULL, category foreign key) rather than checking first.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, TriviaStore};
use crate::models::{Category, NewQuestion, Question};

/// Column list shared by every question query. Casts keep decoding
/// stable when the tables were created with INTEGER columns.
const QUESTION_COLUMNS: &str = "id::BIGINT AS id, question, answer, \
     category::BIGINT AS category, difficulty::BIGINT AS difficulty";

/// sqlx-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id::BIGINT AS id, type FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn questions(&self) -> Result<Vec<Question>, StoreError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id");
        let rows = sqlx::query_as::<_, Question>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");
        let row = sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, StoreError> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE category = $1 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let sql = format!(
            r"SELECT {QUESTION_COLUMNS} FROM questions
              WHERE question ILIKE '%' || $1 || '%' ESCAPE '\'
              ORDER BY id"
        );
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(escape_like(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_question(&self, new: NewQuestion) -> Result<Question, StoreError> {
        let sql = format!(
            "INSERT INTO questions (question, answer, category, difficulty)
             VALUES ($1, $2, $3, $4)
             RETURNING {QUESTION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Question>(&sql)
            .bind(new.question)
            .bind(new.answer)
            .bind(new.category)
            .bind(new.difficulty)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(id = row.id, category = row.category, "question inserted");
        Ok(row)
    }

    async fn delete_question(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                resource: "question",
                id: id.to_string(),
            });
        }

        tracing::debug!(id, "question deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("title"), "title");
        assert_eq!(escape_like("100%"), r"100\%");
        assert_eq!(escape_like("a_b"), r"a\_b");
        assert_eq!(escape_like(r"c:\d"), r"c:\\d");
    }

    // Integration tests - run with DATABASE_URL set
    // cargo test -p trivia-server -- --ignored

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        migrations::seed(&pool).await.expect("seed failed");
        PgStore::new(pool)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_delete_roundtrip() {
        let store = store().await;

        let inserted = store
            .insert_question(NewQuestion {
                question: Some("Which planet is known as the Red Planet?".into()),
                answer: Some("Mars".into()),
                category: Some(1),
                difficulty: Some(1),
            })
            .await
            .expect("insert failed");

        let fetched = store.question(inserted.id).await.expect("lookup failed");
        assert_eq!(fetched, Some(inserted.clone()));

        store.delete_question(inserted.id).await.expect("delete failed");
        assert_eq!(store.question(inserted.id).await.unwrap(), None);

        let again = store.delete_question(inserted.id).await;
        assert!(matches!(again, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_without_question_text_is_rejected() {
        let store = store().await;

        let result = store
            .insert_question(NewQuestion {
                question: None,
                answer: Some("I hope so".into()),
                category: Some(5),
                difficulty: Some(2),
            })
            .await;

        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_is_case_insensitive_and_literal() {
        let store = store().await;

        let hits = store.search_questions("TITLE").await.unwrap();
        assert!(!hits.is_empty());
        assert!(hits
            .iter()
            .all(|q| q.question.to_lowercase().contains("title")));

        let none = store.search_questions("%").await.unwrap();
        assert!(none.iter().all(|q| q.question.contains('%')));
    }
}
