use super::role::RoleKind;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User account; `role` is the joined role name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub contact: String,
    pub address: String,
    pub organization: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl User {
    /// Get role as an enum
    pub fn role_kind(&self) -> Option<RoleKind> {
        RoleKind::from_str(&self.role).ok()
    }

    pub fn is_organizer(&self) -> bool {
        self.role_kind() == Some(RoleKind::Organizer)
    }

    pub fn is_subscriber(&self) -> bool {
        self.role_kind() == Some(RoleKind::Subscriber)
    }
}

/// Values needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub contact: String,
    pub address: String,
    pub organization: String,
    pub role_id: i64,
}

/// Stored bearer token; the raw token never touches the database
#[derive(Debug, Clone, FromRow)]
pub struct AccessToken {
    pub token_hash: String,
    pub user_id: i64,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl AccessToken {
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at <= now
    }
}
