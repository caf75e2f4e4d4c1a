//! HTTP API
//!
//! - `POST /authentication/registration`, `POST /authentication/login`: public
//! - `POST /authentication/logout`, `/core/*`: bearer-token protected
//!
//! Authentication is layered around the protected method routers, so it runs
//! before method dispatch: a wrong verb with a bad token is 401, a wrong verb
//! with a good token is 405.

pub mod auth_routes;
pub mod feedback_routes;
pub mod middleware;
pub mod response;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub use middleware::AuthenticatedUser;
pub use response::ApiResponse;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/authentication/registration", post(auth_routes::register))
        .route("/authentication/login", post(auth_routes::login));

    let protected = Router::new()
        .route("/authentication/logout", post(auth_routes::logout))
        .route(
            "/core/feedback-questions/",
            get(feedback_routes::list_questions),
        )
        .route(
            "/core/feedback/",
            get(feedback_routes::get_feedback).post(feedback_routes::submit_feedback),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    public
        .merge(protected)
        .layer(axum::middleware::from_fn(middleware::log_request))
        .with_state(state)
}
