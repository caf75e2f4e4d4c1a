use crate::models::{Event, EventType, NewEvent};
use sqlx::{Result as SqlxResult, SqlitePool};

const EVENT_COLUMNS: &str = r#"
    id,
    name,
    type_id,
    description,
    date,
    time,
    location,
    subscription_fee,
    no_of_tickets,
    images,
    sold_tickets,
    external_links,
    event_created_by,
    created_at
"#;

/// Repository for event and event type data access
pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    /// Create a new EventRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new event type
    pub async fn create_type(&self, type_name: &str) -> SqlxResult<EventType> {
        sqlx::query_as::<_, EventType>(
            r#"
            INSERT INTO event_types (type)
            VALUES ($1)
            RETURNING id, type
            "#,
        )
        .bind(type_name)
        .fetch_one(&self.pool)
        .await
    }

    /// Find an event type by name
    pub async fn find_type_by_name(&self, type_name: &str) -> SqlxResult<Option<EventType>> {
        sqlx::query_as::<_, EventType>("SELECT id, type FROM event_types WHERE type = $1")
            .bind(type_name)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a new event
    pub async fn create(&self, event: &NewEvent) -> SqlxResult<Event> {
        let sql = format!(
            r#"
            INSERT INTO events (
                name, type_id, description, date, time, location, subscription_fee,
                no_of_tickets, images, sold_tickets, external_links, event_created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );
        sqlx::query_as::<_, Event>(&sql)
            .bind(&event.name)
            .bind(event.type_id)
            .bind(&event.description)
            .bind(event.date)
            .bind(event.time)
            .bind(&event.location)
            .bind(event.subscription_fee)
            .bind(event.no_of_tickets)
            .bind(&event.images)
            .bind(event.sold_tickets)
            .bind(&event.external_links)
            .bind(event.event_created_by)
            .fetch_one(&self.pool)
            .await
    }

    /// Find an event by id
    pub async fn find_by_id(&self, id: i64) -> SqlxResult<Option<Event>> {
        let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
        sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}
