use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Predefined feedback question
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    #[serde(skip_serializing)]
    pub created_at: NaiveDateTime,
}

/// One user's feedback submission for an event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
}

/// Answer row joined with its question and submitter
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackAnswerRow {
    pub feedback_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub question_id: i64,
    pub question: String,
    pub description: String,
    pub image: Option<String>,
    pub submitted_at: NaiveDateTime,
}

/// Validated answer ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub question_id: i64,
    pub description: String,
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Body of `POST /core/feedback/`. Every field is optional at the type level
/// so that missing values surface as validation errors, not parse errors.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackSubmission {
    pub event_id: Option<i64>,
    pub feedback: Option<Vec<FeedbackItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackItem {
    /// Question id
    pub id: Option<i64>,
    pub answer: Option<AnswerPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerPayload {
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Answer as returned by `GET /core/feedback/`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub id: i64,
    pub question: String,
    pub answer: AnswerPayload,
}

impl From<&FeedbackAnswerRow> for AnsweredQuestion {
    fn from(row: &FeedbackAnswerRow) -> Self {
        Self {
            id: row.question_id,
            question: row.question.clone(),
            answer: AnswerPayload {
                description: Some(row.description.clone()),
                image: row.image.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Respondent {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

/// All answers one subscriber gave for an event
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub user: Respondent,
    pub submitted_at: NaiveDateTime,
    pub feedback: Vec<AnsweredQuestion>,
}
