//! Eventhigh Backend Service
//!
//! Main entry point for the Eventhigh event management backend.
//! This service provides:
//! - Registration, login and bearer-token authentication
//! - Feedback questions and event feedback endpoints
//! - Background purging of expired access tokens

use eventhigh_backend::api;
use eventhigh_backend::config::AppConfig;
use eventhigh_backend::database::{create_pool, run_migrations};
use eventhigh_backend::error::{AppError, AppResult};
use eventhigh_backend::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

const TOKEN_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("eventhigh_backend={},sqlx=warn,tower=info", config.log_level).into()
    });

    if config.json_logs() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received, shutting down gracefully...");
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    init_tracing(&config);

    info!("Eventhigh backend starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP address: {}", config.http_addr());

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    info!("Connecting to database...");

    let pool = create_pool(&config.database).await.map_err(|e| {
        error!("Failed to create database pool: {}", e);
        AppError::Database(e)
    })?;

    info!("Database connection pool created successfully");
    if config.database.is_in_memory() {
        warn!("Using an in-memory database; all data is lost on shutdown");
    }

    info!("Running database migrations...");
    run_migrations(&pool).await.map_err(|e| {
        error!("Database migration failed: {}", e);
        AppError::Database(e)
    })?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // SERVICES
    // =========================================================================
    let app_state = Arc::new(AppState::new(pool, config.auth.clone()));
    info!("Application state initialized with repositories");

    let purge_state = app_state.clone();
    let purge_handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(TOKEN_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = purge_state.auth_service.purge_expired_tokens().await {
                warn!("Expired token purge failed: {}", e);
            }
        }
    });

    // =========================================================================
    // START SERVER
    // =========================================================================
    let addr: SocketAddr = config
        .http_addr()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid HTTP address: {}", e)))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Message(format!("Failed to bind HTTP server: {}", e)))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, api::router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Message(format!("HTTP server error: {}", e)))?;

    purge_handle.abort();
    info!("Eventhigh backend shutdown complete");
    Ok(())
}
