use crate::models::AccessToken;
use chrono::NaiveDateTime;
use sqlx::{Result as SqlxResult, SqlitePool};

/// Repository for issued access tokens
pub struct TokenRepository {
    pool: SqlitePool,
}

impl TokenRepository {
    /// Create a new TokenRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store the digest of a freshly issued token
    pub async fn create(
        &self,
        token_hash: &str,
        user_id: i64,
        expires_at: NaiveDateTime,
    ) -> SqlxResult<AccessToken> {
        sqlx::query_as::<_, AccessToken>(
            r#"
            INSERT INTO access_tokens (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token_hash, user_id, expires_at, created_at
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a token by digest, expired or not
    pub async fn find(&self, token_hash: &str) -> SqlxResult<Option<AccessToken>> {
        sqlx::query_as::<_, AccessToken>(
            r#"
            SELECT token_hash, user_id, expires_at, created_at
            FROM access_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
    }

    /// Revoke a single token
    pub async fn revoke(&self, token_hash: &str) -> SqlxResult<bool> {
        let rows_affected = sqlx::query("DELETE FROM access_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Delete every token that expired at or before `now`
    pub async fn purge_expired(&self, now: NaiveDateTime) -> SqlxResult<u64> {
        let rows_affected = sqlx::query("DELETE FROM access_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
