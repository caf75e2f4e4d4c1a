//! Eventhigh Backend Library
//!
//! This module exposes the backend components for use by tests and other consumers.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use config::AuthConfig;
use repositories::*;
use services::{AuthService, FeedbackService};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state containing all repositories and services
pub struct AppState {
    pub role_repo: Arc<RoleRepository>,
    pub user_repo: Arc<UserRepository>,
    pub token_repo: Arc<TokenRepository>,
    pub event_repo: Arc<EventRepository>,
    pub question_repo: Arc<QuestionRepository>,
    pub feedback_repo: Arc<FeedbackRepository>,
    pub auth_service: Arc<AuthService>,
    pub feedback_service: Arc<FeedbackService>,
}

impl AppState {
    /// Create a new AppState with initialized repositories and services
    pub fn new(pool: SqlitePool, auth_config: AuthConfig) -> Self {
        let role_repo = Arc::new(RoleRepository::new(pool.clone()));
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let token_repo = Arc::new(TokenRepository::new(pool.clone()));
        let event_repo = Arc::new(EventRepository::new(pool.clone()));
        let question_repo = Arc::new(QuestionRepository::new(pool.clone()));
        let feedback_repo = Arc::new(FeedbackRepository::new(pool));

        let auth_service = Arc::new(AuthService::new(
            role_repo.clone(),
            user_repo.clone(),
            token_repo.clone(),
            auth_config,
        ));
        let feedback_service = Arc::new(FeedbackService::new(
            event_repo.clone(),
            question_repo.clone(),
            feedback_repo.clone(),
        ));

        Self {
            role_repo,
            user_repo,
            token_repo,
            event_repo,
            question_repo,
            feedback_repo,
            auth_service,
            feedback_service,
        }
    }
}
