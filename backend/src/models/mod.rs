//! Domain models for the Eventhigh backend.
//!
//! Database rows, insert payloads and the JSON shapes of the feedback API.

pub mod event;
pub mod feedback;
pub mod role;
pub mod user;

// Re-export all models for convenient access
pub use event::{Event, EventType, NewEvent};
pub use feedback::{
    AnswerPayload, AnsweredQuestion, Feedback, FeedbackAnswerRow, FeedbackItem,
    FeedbackResponse, FeedbackSubmission, NewAnswer, Question, Respondent,
};
pub use role::{Role, RoleKind};
pub use user::{AccessToken, NewUser, User};
