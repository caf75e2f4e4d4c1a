use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role names understood by the feedback endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Organizer,
    Subscriber,
}

impl RoleKind {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "organizer" => Ok(RoleKind::Organizer),
            "subscriber" => Ok(RoleKind::Subscriber),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Organizer => "organizer",
            RoleKind::Subscriber => "subscriber",
        }
    }
}

impl From<RoleKind> for String {
    fn from(role: RoleKind) -> Self {
        role.as_str().to_string()
    }
}

/// Role row; users reference a role by id
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: i64,
    pub role: String,
}

impl Role {
    /// Get the role as an enum, if it is one the service knows about
    pub fn kind(&self) -> Option<RoleKind> {
        RoleKind::from_str(&self.role).ok()
    }
}
