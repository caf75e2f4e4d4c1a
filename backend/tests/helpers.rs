#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use eventhigh_backend::api;
use eventhigh_backend::config::{AuthConfig, DatabaseConfig};
use eventhigh_backend::database::{create_pool, run_migrations};
use eventhigh_backend::models::*;
use eventhigh_backend::repositories::*;
use eventhigh_backend::AppState;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const PASSWORD: &str = "user123";
pub const ORGANIZER_EMAIL: &str = "user21@gmail.com";
pub const SUBSCRIBER_EMAIL: &str = "user20@gmail.com";

pub const QUESTIONS_ENDPOINT: &str = "/core/feedback-questions/";
pub const FEEDBACK_ENDPOINT: &str = "/core/feedback/";

/// Cheap Argon2 parameters keep the suite quick; production uses the configured default
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        access_token_ttl_secs: 3600,
        password_memory_kib: 64,
        password_time_cost: 1,
    }
}

/// In-memory database with every repository wired to the same pool
pub struct TestDatabase {
    pub pool: SqlitePool,
    pub role_repo: Arc<RoleRepository>,
    pub user_repo: Arc<UserRepository>,
    pub token_repo: Arc<TokenRepository>,
    pub event_repo: Arc<EventRepository>,
    pub question_repo: Arc<QuestionRepository>,
    pub feedback_repo: Arc<FeedbackRepository>,
}

impl TestDatabase {
    /// Create a fresh, migrated in-memory database
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 300,
            max_lifetime_secs: 600,
            test_before_acquire: true,
        };

        let pool = create_pool(&config)
            .await
            .expect("Failed to create test database pool");

        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self::from_pool(pool)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool: pool.clone(),
            role_repo: Arc::new(RoleRepository::new(pool.clone())),
            user_repo: Arc::new(UserRepository::new(pool.clone())),
            token_repo: Arc::new(TokenRepository::new(pool.clone())),
            event_repo: Arc::new(EventRepository::new(pool.clone())),
            question_repo: Arc::new(QuestionRepository::new(pool.clone())),
            feedback_repo: Arc::new(FeedbackRepository::new(pool)),
        }
    }
}

/// Insert a user directly, bypassing the HTTP layer
pub async fn create_test_user(db: &TestDatabase, email: &str, role: &str) -> User {
    let role = db
        .role_repo
        .find_or_create(role)
        .await
        .expect("Failed to find role");

    db.user_repo
        .create(&NewUser {
            email: email.to_string(),
            name: email.to_string(),
            password_hash: eventhigh_backend::auth::hash_password(
                PASSWORD,
                test_auth_config()
                    .password_params()
                    .expect("valid test hashing params"),
            )
            .expect("Failed to hash test password"),
            contact: "9999911111".to_string(),
            address: "Bangalore".to_string(),
            organization: "Eventhigh".to_string(),
            role_id: role.id,
        })
        .await
        .expect("Failed to create test user")
}

/// Insert an event of type "test" organized by `created_by`
pub async fn create_test_event(db: &TestDatabase, created_by: i64) -> Event {
    let event_type = match db
        .event_repo
        .find_type_by_name("test")
        .await
        .expect("Failed to look up event type")
    {
        Some(event_type) => event_type,
        None => db
            .event_repo
            .create_type("test")
            .await
            .expect("Failed to create event type"),
    };

    db.event_repo
        .create(&NewEvent {
            name: "test_event".to_string(),
            type_id: event_type.id,
            description: "New Event".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 4, 2).expect("valid date"),
            time: NaiveTime::from_hms_opt(12, 38, 0).expect("valid time"),
            location: "karnal".to_string(),
            subscription_fee: 499,
            no_of_tickets: 250,
            images: "https://www.google.com/images".to_string(),
            sold_tickets: 0,
            external_links: "google.com".to_string(),
            event_created_by: created_by,
        })
        .await
        .expect("Failed to create test event")
}

pub async fn create_test_question(db: &TestDatabase, text: &str) -> Question {
    db.question_repo
        .create(text)
        .await
        .expect("Failed to create test question")
}

pub fn registration_body(email: &str, role: &str) -> Value {
    json!({
        "email": email,
        "name": email,
        "password": PASSWORD,
        "contact": "9999911111",
        "address": "Bangalore",
        "role": role,
        "organization": "Eventhigh"
    })
}

/// The real router served on an ephemeral port
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub db: TestDatabase,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_auth_config()).await
    }

    pub async fn spawn_with(auth_config: AuthConfig) -> Self {
        let db = TestDatabase::new().await;
        let state = Arc::new(AppState::new(db.pool.clone(), auth_config));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Failed to read local addr")
        );

        let app = api::router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            address,
            client: Client::new(),
            db,
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn register(&self, email: &str, role: &str) -> Response {
        self.client
            .post(self.url("/authentication/registration"))
            .json(&registration_body(email, role))
            .send()
            .await
            .expect("registration request failed")
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.client
            .post(self.url("/authentication/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed")
    }

    /// Log in and return `(user_id, access token)`
    pub async fn login_token(&self, email: &str) -> (i64, String) {
        let body: Value = self
            .login(email, PASSWORD)
            .await
            .json()
            .await
            .expect("login response was not JSON");
        let user_id = body["data"]["user"]["user_id"]
            .as_i64()
            .expect("login response missing user_id");
        let token = body["data"]["access"]
            .as_str()
            .expect("login response missing access token")
            .to_string();
        (user_id, token)
    }

    pub async fn get(&self, path: &str, token: &str) -> Response {
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn put(&self, path: &str, token: &str) -> Response {
        self.client
            .put(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("PUT request failed")
    }

    pub async fn post_json(&self, path: &str, token: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }
}

/// Setup shared by the feedback endpoint tests: an organizer, a subscriber,
/// one event owned by the organizer and one question.
pub struct FeedbackFixture {
    pub app: TestApp,
    pub organizer_id: i64,
    pub subscriber_id: i64,
    pub subscriber_token: String,
    pub event: Event,
    pub question: Question,
}

impl FeedbackFixture {
    pub async fn create() -> Self {
        let app = TestApp::spawn().await;

        app.register(ORGANIZER_EMAIL, "organizer").await;
        app.register(SUBSCRIBER_EMAIL, "subscriber").await;

        let organizer = app
            .db
            .user_repo
            .find_by_email(ORGANIZER_EMAIL)
            .await
            .expect("Failed to look up organizer")
            .expect("Organizer should be registered");

        let (subscriber_id, subscriber_token) = app.login_token(SUBSCRIBER_EMAIL).await;

        let event = create_test_event(&app.db, organizer.id).await;
        let question = create_test_question(&app.db, "Demo question1 ?").await;

        Self {
            organizer_id: organizer.id,
            subscriber_id,
            subscriber_token,
            event,
            question,
            app,
        }
    }

    pub async fn organizer_token(&self) -> String {
        self.app.login_token(ORGANIZER_EMAIL).await.1
    }

    pub fn valid_submission(&self) -> Value {
        json!({
            "event_id": self.event.id,
            "feedback": [{
                "id": self.question.id,
                "answer": {
                    "description": "abcd",
                    "image": "demo.jpeg"
                }
            }]
        })
    }
}
