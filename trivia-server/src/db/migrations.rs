//! Schema creation and seeding for the trivia tables

use sqlx::PgPool;

use crate::store::seed;

/// Create the `categories` and `questions` tables if missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running trivia migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            type TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id BIGSERIAL PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            category BIGINT NOT NULL REFERENCES categories(id),
            difficulty BIGINT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category)")
        .execute(pool)
        .await?;

    tracing::info!("Trivia migrations complete");
    Ok(())
}

/// Load the starter categories and questions into an empty database.
///
/// Returns `false` without touching anything when categories already
/// exist.
pub async fn seed(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::info!(existing, "Categories present, skipping seed");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    for category in seed::categories() {
        sqlx::query("INSERT INTO categories (id, type) VALUES ($1, $2)")
            .bind(category.id)
            .bind(&category.kind)
            .execute(&mut *tx)
            .await?;
    }

    // Explicit ids above leave the sequence behind
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('categories', 'id'), (SELECT MAX(id) FROM categories))",
    )
    .execute(&mut *tx)
    .await?;

    for question in seed::questions() {
        sqlx::query(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES ($1, $2, $3, $4)",
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        categories = seed::CATEGORIES.len(),
        questions = seed::QUESTIONS.len(),
        "Seeded trivia data"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");

        seed(&pool).await.expect("first seed failed");
        let reseeded = seed(&pool).await.expect("second seed failed");
        assert!(!reseeded);
    }
}
