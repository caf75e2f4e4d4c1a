use super::middleware::AuthenticatedUser;
use super::response::ApiResponse;
use crate::error::AppResult;
use crate::models::{FeedbackSubmission, Question};
use crate::services::feedback_service::parse_event_id;
use crate::services::FeedbackView;
use crate::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// `?event_id=` is kept as text so a bad value is a 400 with a useful message
#[derive(Debug, Deserialize)]
pub struct FeedbackQuery {
    pub event_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmittedFeedback {
    pub feedback_id: i64,
    pub event_id: i64,
    pub answers: usize,
}

pub async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<Vec<Question>>>> {
    let questions = state.feedback_service.list_questions().await?;
    Ok(Json(ApiResponse::new("Feedback questions", questions)))
}

pub async fn get_feedback(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthenticatedUser>,
    query: Result<Query<FeedbackQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<FeedbackView>>> {
    let Query(query) = query?;
    let event_id = parse_event_id(query.event_id.as_deref())?;
    let view = state
        .feedback_service
        .get_feedback(&caller.user, event_id)
        .await?;
    Ok(Json(ApiResponse::new("Event feedback", view)))
}

pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<FeedbackSubmission>, JsonRejection>,
) -> AppResult<Json<ApiResponse<SubmittedFeedback>>> {
    let Json(submission) = payload?;
    let (feedback, answers) = state
        .feedback_service
        .submit_feedback(&caller.user, submission)
        .await?;
    Ok(Json(ApiResponse::new(
        "Feedback submitted successfully",
        SubmittedFeedback {
            feedback_id: feedback.id,
            event_id: feedback.event_id,
            answers,
        },
    )))
}
