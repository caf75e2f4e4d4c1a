use crate::models::{NewUser, User};
use sqlx::{Result as SqlxResult, SqlitePool};

const USER_COLUMNS: &str = r#"
    u.id,
    u.email,
    u.name,
    u.password_hash,
    u.contact,
    u.address,
    u.organization,
    r.role AS role,
    u.is_active,
    u.created_at
"#;

/// Repository for user data access
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user
    pub async fn create(&self, new_user: &NewUser) -> SqlxResult<User> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, name, password_hash, contact, address, organization, role_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.password_hash)
        .bind(&new_user.contact)
        .bind(&new_user.address)
        .bind(&new_user.organization)
        .bind(new_user.role_id)
        .fetch_one(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a user by id
    pub async fn find_by_id(&self, id: i64) -> SqlxResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> SqlxResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.email = $1",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    /// Activate or deactivate an account
    pub async fn set_active(&self, id: i64, is_active: bool) -> SqlxResult<bool> {
        let rows_affected = sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(is_active)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
