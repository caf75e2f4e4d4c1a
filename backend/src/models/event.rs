use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Event category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventType {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub type_name: String,
}

/// Event model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub type_id: i64,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub subscription_fee: i64,
    pub no_of_tickets: i64,
    pub images: String,
    pub sold_tickets: i64,
    pub external_links: String,
    pub event_created_by: i64,
    pub created_at: NaiveDateTime,
}

impl Event {
    /// Check if the given user organizes this event
    pub fn is_created_by(&self, user_id: i64) -> bool {
        self.event_created_by == user_id
    }
}

/// Values needed to insert an event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub type_id: i64,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub subscription_fee: i64,
    pub no_of_tickets: i64,
    pub images: String,
    pub sold_tickets: i64,
    pub external_links: String,
    pub event_created_by: i64,
}
