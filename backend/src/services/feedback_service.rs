use crate::error::{AppError, AppResult, RepositoryError};
use crate::models::{
    AnsweredQuestion, Event, Feedback, FeedbackAnswerRow, FeedbackResponse, FeedbackSubmission,
    NewAnswer, Question, Respondent, User,
};
use crate::repositories::{EventRepository, FeedbackRepository, QuestionRepository};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// What `GET /core/feedback/` returns, depending on the caller's role
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FeedbackView {
    /// A subscriber's own answers
    Own {
        event_id: i64,
        feedback: Vec<AnsweredQuestion>,
    },
    /// Every submission for an event the organizer created
    All {
        event_id: i64,
        responses: Vec<FeedbackResponse>,
    },
}

/// Service for feedback questions and event feedback
pub struct FeedbackService {
    event_repo: Arc<EventRepository>,
    question_repo: Arc<QuestionRepository>,
    feedback_repo: Arc<FeedbackRepository>,
}

/// Parse the `event_id` query parameter
pub fn parse_event_id(raw: Option<&str>) -> AppResult<i64> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("event_id is required".into()))?;
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid event_id: {}", raw)))
}

/// Check the shape of a submission and turn it into storable answers.
/// Question existence is checked separately against the database.
pub fn validate_answers(submission: &FeedbackSubmission) -> AppResult<Vec<NewAnswer>> {
    let items = match submission.feedback.as_deref() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(AppError::Validation("feedback is required".into())),
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut answers = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let question_id = item
            .id
            .ok_or_else(|| AppError::Validation(format!("feedback[{}]: question id is required", index)))?;

        if !seen.insert(question_id) {
            return Err(AppError::Validation(format!(
                "feedback[{}]: question {} answered more than once",
                index, question_id
            )));
        }

        let answer = item
            .answer
            .as_ref()
            .ok_or_else(|| AppError::Validation(format!("feedback[{}]: answer is required", index)))?;

        let description = answer
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                AppError::Validation(format!("feedback[{}]: answer description is required", index))
            })?;

        let image = answer
            .image
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .map(str::to_string);

        answers.push(NewAnswer {
            question_id,
            description: description.to_string(),
            image,
        });
    }

    Ok(answers)
}

/// Group joined answer rows into one response per submission.
/// Rows must be ordered by feedback id.
fn group_responses(rows: &[FeedbackAnswerRow]) -> Vec<FeedbackResponse> {
    let mut responses: Vec<(i64, FeedbackResponse)> = Vec::new();
    for row in rows {
        let continues_last =
            matches!(responses.last(), Some((feedback_id, _)) if *feedback_id == row.feedback_id);
        if continues_last {
            if let Some((_, response)) = responses.last_mut() {
                response.feedback.push(AnsweredQuestion::from(row));
            }
            continue;
        }
        responses.push((
            row.feedback_id,
            FeedbackResponse {
                user: Respondent {
                    user_id: row.user_id,
                    name: row.user_name.clone(),
                    email: row.user_email.clone(),
                },
                submitted_at: row.submitted_at,
                feedback: vec![AnsweredQuestion::from(row)],
            },
        ));
    }
    responses.into_iter().map(|(_, response)| response).collect()
}

impl FeedbackService {
    pub fn new(
        event_repo: Arc<EventRepository>,
        question_repo: Arc<QuestionRepository>,
        feedback_repo: Arc<FeedbackRepository>,
    ) -> Self {
        Self {
            event_repo,
            question_repo,
            feedback_repo,
        }
    }

    /// List the predefined feedback questions
    pub async fn list_questions(&self) -> AppResult<Vec<Question>> {
        Ok(self.question_repo.list_all().await?)
    }

    /// Unknown events are a bad request, not a 404
    async fn require_event(&self, event_id: i64) -> AppResult<Event> {
        self.event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("Event {} does not exist", event_id)))
    }

    /// Feedback for an event as visible to `user`
    pub async fn get_feedback(&self, user: &User, event_id: i64) -> AppResult<FeedbackView> {
        let event = self.require_event(event_id).await?;

        if user.is_organizer() {
            if !event.is_created_by(user.id) {
                return Err(AppError::Forbidden(
                    "Only the organizer of this event can view its feedback".into(),
                ));
            }
            let rows = self.feedback_repo.find_answers_for_event(event.id).await?;
            return Ok(FeedbackView::All {
                event_id: event.id,
                responses: group_responses(&rows),
            });
        }

        let rows = self
            .feedback_repo
            .find_answers_for_user(event.id, user.id)
            .await?;
        Ok(FeedbackView::Own {
            event_id: event.id,
            feedback: rows.iter().map(AnsweredQuestion::from).collect(),
        })
    }

    /// Store a subscriber's feedback for an event
    pub async fn submit_feedback(
        &self,
        user: &User,
        submission: FeedbackSubmission,
    ) -> AppResult<(Feedback, usize)> {
        if !user.is_subscriber() {
            return Err(AppError::Forbidden("Only subscribers can submit feedback".into()));
        }

        let event_id = submission
            .event_id
            .ok_or_else(|| AppError::Validation("event_id is required".into()))?;
        let event = self.require_event(event_id).await?;

        let answers = validate_answers(&submission)?;

        let question_ids: Vec<i64> = answers.iter().map(|a| a.question_id).collect();
        let known: HashSet<i64> = self
            .question_repo
            .find_by_ids(&question_ids)
            .await?
            .into_iter()
            .map(|q| q.id)
            .collect();
        if let Some(missing) = question_ids.iter().find(|id| !known.contains(id)) {
            return Err(AppError::Validation(format!(
                "Question {} does not exist",
                missing
            )));
        }

        if self.feedback_repo.has_submitted(event.id, user.id).await? {
            return Err(AppError::Validation(
                "Feedback for this event has already been submitted".into(),
            ));
        }

        let feedback = self
            .feedback_repo
            .create_with_answers(event.id, user.id, &answers)
            .await
            .map_err(|e| match RepositoryError::from(e) {
                RepositoryError::Duplicate(_) => AppError::Validation(
                    "Feedback for this event has already been submitted".into(),
                ),
                other => other.into(),
            })?;

        info!(
            "User {} submitted {} answers for event {}",
            user.id,
            answers.len(),
            event.id
        );
        Ok((feedback, answers.len()))
    }
}
