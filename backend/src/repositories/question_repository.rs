use crate::models::Question;
use sqlx::{QueryBuilder, Result as SqlxResult, Sqlite, SqlitePool};

/// Repository for feedback question data access
pub struct QuestionRepository {
    pool: SqlitePool,
}

impl QuestionRepository {
    /// Create a new QuestionRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new question
    pub async fn create(&self, question: &str) -> SqlxResult<Question> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question)
            VALUES ($1)
            RETURNING id, question, created_at
            "#,
        )
        .bind(question)
        .fetch_one(&self.pool)
        .await
    }

    /// List every question in id order
    pub async fn list_all(&self) -> SqlxResult<Vec<Question>> {
        sqlx::query_as::<_, Question>(
            "SELECT id, question, created_at FROM questions ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Fetch the subset of `ids` that exist
    pub async fn find_by_ids(&self, ids: &[i64]) -> SqlxResult<Vec<Question>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, question, created_at FROM questions WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id ASC");

        builder
            .build_query_as::<Question>()
            .fetch_all(&self.pool)
            .await
    }
}
