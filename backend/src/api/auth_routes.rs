use super::middleware::AuthenticatedUser;
use super::response::ApiResponse;
use crate::error::AppResult;
use crate::models::User;
use crate::services::{Credentials, Registration};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Public view of a user account
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub contact: String,
    pub address: String,
    pub organization: String,
    pub role: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            name: user.name,
            contact: user.contact,
            address: user.address,
            organization: user.organization,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub user: UserProfile,
    pub access: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserProfile>>)> {
    let Json(registration) = payload?;
    let user = state.auth_service.register(registration).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("User registered successfully", user.into())),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<Json<ApiResponse<LoginData>>> {
    let Json(credentials) = payload?;
    let outcome = state.auth_service.login(credentials).await?;
    Ok(Json(ApiResponse::new(
        "Login successful",
        LoginData {
            user: outcome.user.into(),
            access: outcome.access,
            expires_at: outcome.expires_at.and_utc(),
        },
    )))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.auth_service.logout(&caller.token).await?;
    Ok(Json(ApiResponse::new("Logged out successfully", ())))
}
