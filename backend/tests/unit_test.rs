use chrono::{NaiveDate, NaiveTime};
use eventhigh_backend::models::*;
use eventhigh_backend::services::FeedbackView;
use serde_json::json;

fn sample_user(role: &str) -> User {
    User {
        id: 1,
        email: "user20@gmail.com".into(),
        name: "user20@gmail.com".into(),
        password_hash: "sha256$1$00$00".into(),
        contact: "9999911111".into(),
        address: "Bangalore".into(),
        organization: "Eventhigh".into(),
        role: role.into(),
        is_active: true,
        created_at: chrono::Utc::now().naive_utc(),
    }
}

/// Unit tests for Models
#[test]
fn test_role_kind_conversion() {
    assert_eq!(RoleKind::from_str("organizer").unwrap(), RoleKind::Organizer);
    assert_eq!(RoleKind::from_str(" Subscriber ").unwrap(), RoleKind::Subscriber);
    assert!(RoleKind::from_str("admin").is_err());
    assert_eq!(String::from(RoleKind::Organizer), "organizer");
}

#[test]
fn test_user_role_helpers() {
    let subscriber = sample_user("subscriber");
    assert!(subscriber.is_subscriber());
    assert!(!subscriber.is_organizer());

    let unknown = sample_user("admin");
    assert_eq!(unknown.role_kind(), None);
    assert!(!unknown.is_subscriber());
}

#[test]
fn test_user_serialization_hides_password_hash() {
    let value = serde_json::to_value(sample_user("organizer")).unwrap();
    assert!(value.get("password_hash").is_none());
    assert_eq!(value["role"], json!("organizer"));
}

#[test]
fn test_access_token_expiry() {
    let now = chrono::Utc::now().naive_utc();
    let token = AccessToken {
        token_hash: "abc".into(),
        user_id: 1,
        expires_at: now,
        created_at: now,
    };
    assert!(token.is_expired(now));
    assert!(!token.is_expired(now - chrono::Duration::seconds(1)));
}

#[test]
fn test_event_type_serializes_as_type() {
    let event_type = EventType {
        id: 3,
        type_name: "test".into(),
    };
    assert_eq!(
        serde_json::to_value(&event_type).unwrap(),
        json!({ "id": 3, "type": "test" })
    );
}

#[test]
fn test_event_creator_check() {
    let event = Event {
        id: 1,
        name: "test_event".into(),
        type_id: 1,
        description: "New Event".into(),
        date: NaiveDate::from_ymd_opt(2020, 4, 2).unwrap(),
        time: NaiveTime::from_hms_opt(12, 38, 0).unwrap(),
        location: "karnal".into(),
        subscription_fee: 499,
        no_of_tickets: 250,
        images: String::new(),
        sold_tickets: 0,
        external_links: "google.com".into(),
        event_created_by: 7,
        created_at: chrono::Utc::now().naive_utc(),
    };
    assert!(event.is_created_by(7));
    assert!(!event.is_created_by(8));
}

#[test]
fn test_feedback_submission_parses_partial_items() {
    let submission: FeedbackSubmission = serde_json::from_value(json!({
        "event_id": 1,
        "feedback": [{ "answer": { "description": "abcd", "image": "demo.jpeg" } }]
    }))
    .unwrap();

    let items = submission.feedback.unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].id.is_none());
    assert_eq!(items[0].answer.as_ref().unwrap().image.as_deref(), Some("demo.jpeg"));
}

#[test]
fn test_feedback_view_shapes() {
    let own = FeedbackView::Own {
        event_id: 1,
        feedback: vec![AnsweredQuestion {
            id: 2,
            question: "Demo question1 ?".into(),
            answer: AnswerPayload {
                description: Some("abcd".into()),
                image: None,
            },
        }],
    };
    assert_eq!(
        serde_json::to_value(&own).unwrap(),
        json!({
            "event_id": 1,
            "feedback": [{
                "id": 2,
                "question": "Demo question1 ?",
                "answer": { "description": "abcd", "image": null }
            }]
        })
    );

    let all = FeedbackView::All {
        event_id: 1,
        responses: vec![],
    };
    assert_eq!(
        serde_json::to_value(&all).unwrap(),
        json!({ "event_id": 1, "responses": [] })
    );
}

#[test]
fn test_question_serialization_omits_timestamp() {
    let question = Question {
        id: 1,
        question: "Demo question1 ?".into(),
        created_at: chrono::Utc::now().naive_utc(),
    };
    assert_eq!(
        serde_json::to_value(&question).unwrap(),
        json!({ "id": 1, "question": "Demo question1 ?" })
    );
}
