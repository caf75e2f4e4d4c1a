use crate::models::Role;
use sqlx::{Result as SqlxResult, SqlitePool};

/// Repository for role data access
pub struct RoleRepository {
    pool: SqlitePool,
}

impl RoleRepository {
    /// Create a new RoleRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new role
    pub async fn create(&self, role: &str) -> SqlxResult<Role> {
        sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (role)
            VALUES ($1)
            RETURNING id, role
            "#,
        )
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a role by name (case-insensitive)
    pub async fn find_by_name(&self, role: &str) -> SqlxResult<Option<Role>> {
        sqlx::query_as::<_, Role>(
            r#"
            SELECT id, role
            FROM roles
            WHERE role = LOWER(TRIM($1))
            "#,
        )
        .bind(role)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find or create a role by name
    pub async fn find_or_create(&self, role: &str) -> SqlxResult<Role> {
        if let Some(existing) = self.find_by_name(role).await? {
            return Ok(existing);
        }

        self.create(&role.trim().to_lowercase()).await
    }

    /// List all roles
    pub async fn list(&self) -> SqlxResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT id, role FROM roles ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
    }
}
