use crate::auth;
use crate::config::AuthConfig;
use crate::error::{AppError, AppResult, RepositoryError};
use crate::models::{NewUser, User};
use crate::repositories::{RoleRepository, TokenRepository, UserRepository};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Body of `POST /authentication/registration`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub organization: Option<String>,
}

/// Body of `POST /authentication/login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub access: String,
    pub expires_at: NaiveDateTime,
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(AppError::Validation("Enter a valid email address".into())),
    }
}

/// Service for registration, login and bearer-token verification
pub struct AuthService {
    role_repo: Arc<RoleRepository>,
    user_repo: Arc<UserRepository>,
    token_repo: Arc<TokenRepository>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(
        role_repo: Arc<RoleRepository>,
        user_repo: Arc<UserRepository>,
        token_repo: Arc<TokenRepository>,
        config: AuthConfig,
    ) -> Self {
        Self {
            role_repo,
            user_repo,
            token_repo,
            config,
        }
    }

    /// Register a new user under an existing role
    pub async fn register(&self, registration: Registration) -> AppResult<User> {
        let email = normalize_email(&required(registration.email, "email")?)?;
        let name = required(registration.name, "name")?;
        let role_name = required(registration.role, "role")?;
        let password = registration
            .password
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| AppError::Validation("password is required".into()))?;

        let role = self
            .role_repo
            .find_by_name(&role_name)
            .await?
            .ok_or_else(|| AppError::Validation(format!("Role '{}' does not exist", role_name)))?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Validation("User with this email already exists".into()));
        }

        let params = self.config.password_params().map_err(AppError::Config)?;
        let new_user = NewUser {
            email,
            name,
            password_hash: auth::hash_password(&password, params)?,
            contact: registration.contact.unwrap_or_default().trim().to_string(),
            address: registration.address.unwrap_or_default().trim().to_string(),
            organization: registration.organization.unwrap_or_default().trim().to_string(),
            role_id: role.id,
        };

        // A concurrent registration can still win the unique index
        let user = self
            .user_repo
            .create(&new_user)
            .await
            .map_err(|e| match RepositoryError::from(e) {
                RepositoryError::Duplicate(_) => {
                    AppError::Validation("User with this email already exists".into())
                }
                other => other.into(),
            })?;

        info!("Registered user {} ({}) as {}", user.email, user.id, user.role);
        Ok(user)
    }

    /// Check credentials and issue an access token
    pub async fn login(&self, credentials: Credentials) -> AppResult<LoginOutcome> {
        let email = required(credentials.email, "email")?.to_lowercase();
        let password = credentials
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::Validation("password is required".into()))?;

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) if auth::verify_password(&password, &user.password_hash) => user,
            _ => {
                warn!("Rejected login for {}", email);
                return Err(AppError::Unauthorized("Invalid email or password".into()));
            }
        };

        if !user.is_active {
            warn!("Rejected login for inactive user {}", user.id);
            return Err(AppError::Unauthorized("User account is disabled".into()));
        }

        let expires_at = self
            .config
            .access_token_ttl()
            .and_then(|ttl| chrono::Utc::now().naive_utc().checked_add_signed(ttl))
            .ok_or_else(|| AppError::Config("ACCESS_TOKEN_TTL_SECS is out of range".into()))?;

        let access = auth::generate_token();
        self.token_repo
            .create(&auth::hash_token(&access), user.id, expires_at)
            .await?;

        info!("User {} logged in", user.id);
        Ok(LoginOutcome {
            user,
            access,
            expires_at,
        })
    }

    /// Resolve a bearer token to its active user
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let stored = self
            .token_repo
            .find(&auth::hash_token(token))
            .await?
            .ok_or_else(|| AppError::Unauthorized("Given token not valid".into()))?;

        if stored.is_expired(chrono::Utc::now().naive_utc()) {
            return Err(AppError::Unauthorized("Given token has expired".into()));
        }

        let user = self
            .user_repo
            .find_by_id(stored.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

        if !user.is_active {
            return Err(AppError::Unauthorized("User account is disabled".into()));
        }

        Ok(user)
    }

    /// Revoke a bearer token
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        if !self.token_repo.revoke(&auth::hash_token(token)).await? {
            return Err(AppError::Unauthorized("Given token not valid".into()));
        }
        Ok(())
    }

    /// Drop expired tokens; returns how many were removed
    pub async fn purge_expired_tokens(&self) -> AppResult<u64> {
        let purged = self
            .token_repo
            .purge_expired(chrono::Utc::now().naive_utc())
            .await?;
        if purged > 0 {
            info!("Purged {} expired access tokens", purged);
        }
        Ok(purged)
    }
}
