use crate::models::{Feedback, FeedbackAnswerRow, NewAnswer};
use sqlx::{Result as SqlxResult, SqlitePool};

const ANSWER_ROW_SELECT: &str = r#"
    SELECT
        f.id AS feedback_id,
        f.user_id AS user_id,
        u.name AS user_name,
        u.email AS user_email,
        a.question_id AS question_id,
        q.question AS question,
        a.description AS description,
        a.image AS image,
        f.created_at AS submitted_at
    FROM feedback f
    JOIN feedback_answers a ON a.feedback_id = f.id
    JOIN questions q ON q.id = a.question_id
    JOIN users u ON u.id = f.user_id
"#;

/// Repository for feedback submissions and their answers
pub struct FeedbackRepository {
    pool: SqlitePool,
}

impl FeedbackRepository {
    /// Create a new FeedbackRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a submission and all of its answers in one transaction
    pub async fn create_with_answers(
        &self,
        event_id: i64,
        user_id: i64,
        answers: &[NewAnswer],
    ) -> SqlxResult<Feedback> {
        let mut tx = self.pool.begin().await?;

        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (event_id, user_id)
            VALUES ($1, $2)
            RETURNING id, event_id, user_id, created_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        for answer in answers {
            sqlx::query(
                r#"
                INSERT INTO feedback_answers (feedback_id, question_id, description, image)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(feedback.id)
            .bind(answer.question_id)
            .bind(&answer.description)
            .bind(&answer.image)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(feedback)
    }

    /// Find the submission a user made for an event
    pub async fn find_by_event_and_user(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> SqlxResult<Option<Feedback>> {
        sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, event_id, user_id, created_at
            FROM feedback
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Check whether a user already submitted feedback for an event
    pub async fn has_submitted(&self, event_id: i64, user_id: i64) -> SqlxResult<bool> {
        Ok(self.find_by_event_and_user(event_id, user_id).await?.is_some())
    }

    /// Answers a single user gave for an event
    pub async fn find_answers_for_user(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> SqlxResult<Vec<FeedbackAnswerRow>> {
        let sql = format!(
            "{} WHERE f.event_id = $1 AND f.user_id = $2 ORDER BY a.question_id ASC",
            ANSWER_ROW_SELECT
        );
        sqlx::query_as::<_, FeedbackAnswerRow>(&sql)
            .bind(event_id)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Answers from every user for an event, grouped by submission
    pub async fn find_answers_for_event(&self, event_id: i64) -> SqlxResult<Vec<FeedbackAnswerRow>> {
        let sql = format!(
            "{} WHERE f.event_id = $1 ORDER BY f.id ASC, a.question_id ASC",
            ANSWER_ROW_SELECT
        );
        sqlx::query_as::<_, FeedbackAnswerRow>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Number of submissions for an event
    pub async fn count_for_event(&self, event_id: i64) -> SqlxResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedback WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
    }
}
