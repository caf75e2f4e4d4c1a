pub mod auth_service;
pub mod feedback_service;

pub use auth_service::{AuthService, Credentials, LoginOutcome, Registration};
pub use feedback_service::{FeedbackService, FeedbackView};
