use crate::auth;
use crate::error::AppError;
use crate::models::User;
use crate::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// The caller resolved from a bearer token, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    /// Raw bearer token, kept so logout can revoke it
    pub token: String,
}

/// Reject requests without a valid bearer token
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = auth::bearer_token(request.headers())?.to_string();

    let user = match state.auth_service.authenticate(&token).await {
        Ok(user) => user,
        Err(err) => {
            warn!(path = %request.uri().path(), "Rejected bearer token: {}", err);
            return Err(err);
        }
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user, token });
    Ok(next.run(request).await)
}

/// Log method, path, status and latency for every request
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );
    response
}
