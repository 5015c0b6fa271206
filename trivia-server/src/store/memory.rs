//! In-process store
//!
//! Mirrors the PostgreSQL schema closely enough for the HTTP contract:
//! ids are assigned in increasing order, reads come back ordered by id,
//! and inserts enforce the NOT NULL columns and the category foreign key.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::seed;
use super::{StoreError, TriviaStore};
use crate::models::{Category, NewQuestion, Question};

#[derive(Debug)]
struct Tables {
    categories: Vec<Category>,
    questions: Vec<Question>,
    next_question_id: i64,
}

/// Memory-backed store
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store; the first inserted question gets id 1.
    pub fn new() -> Self {
        Self::from_rows(Vec::new(), Vec::new())
    }

    /// Build a store from existing rows. Rows are sorted by id.
    pub fn from_rows(mut categories: Vec<Category>, mut questions: Vec<Question>) -> Self {
        categories.sort_by_key(|c| c.id);
        questions.sort_by_key(|q| q.id);
        let next_question_id = questions.last().map_or(1, |q| q.id + 1);

        Self {
            tables: RwLock::new(Tables {
                categories,
                questions,
                next_question_id,
            }),
        }
    }

    /// Store preloaded with the standard categories and starter questions.
    pub fn seeded() -> Self {
        Self::from_rows(seed::categories(), seed::questions())
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.tables.read().await.categories.clone())
    }

    async fn questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.tables.read().await.questions.clone())
    }

    async fn question(&self, id: i64) -> Result<Option<Question>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .iter()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert_question(&self, new: NewQuestion) -> Result<Question, StoreError> {
        let not_null = |field: &str| StoreError::Constraint(format!("{} must not be null", field));

        let question = new.question.ok_or_else(|| not_null("question"))?;
        let answer = new.answer.ok_or_else(|| not_null("answer"))?;
        let category = new.category.ok_or_else(|| not_null("category"))?;
        let difficulty = new.difficulty.ok_or_else(|| not_null("difficulty"))?;

        let mut tables = self.tables.write().await;
        if !tables.categories.iter().any(|c| c.id == category) {
            return Err(StoreError::Constraint(format!(
                "category {} does not exist",
                category
            )));
        }

        let row = Question {
            id: tables.next_question_id,
            question,
            answer,
            category,
            difficulty,
        };
        tables.next_question_id += 1;
        tables.questions.push(row.clone());

        Ok(row)
    }

    async fn delete_question(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);

        if tables.questions.len() == before {
            return Err(StoreError::NotFound {
                resource: "question",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(category: i64) -> NewQuestion {
        NewQuestion {
            question: Some("Did this question do what it should?".into()),
            answer: Some("I hope so".into()),
            category: Some(category),
            difficulty: Some(2),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryStore::seeded();
        let before = store.questions().await.unwrap();
        let last_id = before.last().unwrap().id;

        let first = store.insert_question(new_question(5)).await.unwrap();
        let second = store.insert_question(new_question(5)).await.unwrap();

        assert_eq!(first.id, last_id + 1);
        assert_eq!(second.id, last_id + 2);
        assert_eq!(store.questions().await.unwrap().len(), before.len() + 2);
    }

    #[tokio::test]
    async fn insert_rejects_missing_fields() {
        let store = MemoryStore::seeded();
        let mut incomplete = new_question(5);
        incomplete.question = None;

        let err = store.insert_question(incomplete).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn insert_rejects_unknown_category() {
        let store = MemoryStore::seeded();
        let err = store.insert_question(new_question(999)).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn delete_removes_row_once() {
        let store = MemoryStore::seeded();
        let id = store.questions().await.unwrap()[0].id;

        store.delete_question(id).await.unwrap();
        assert_eq!(store.question(id).await.unwrap(), None);

        let err = store.delete_question(id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { resource: "question", .. }));
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let store = MemoryStore::from_rows(
            vec![Category::new(1, "Science")],
            vec![
                Question {
                    id: 1,
                    question: "What is the TITLE of this?".into(),
                    answer: "a".into(),
                    category: 1,
                    difficulty: 1,
                },
                Question {
                    id: 2,
                    question: "Unrelated".into(),
                    answer: "b".into(),
                    category: 1,
                    difficulty: 1,
                },
            ],
        );

        let hits = store.search_questions("title").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let all = store.search_questions("").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn reads_are_ordered_by_id() {
        let store = MemoryStore::from_rows(
            vec![Category::new(2, "Art"), Category::new(1, "Science")],
            Vec::new(),
        );
        let ids: Vec<i64> = store.categories().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
