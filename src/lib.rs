//! Access Token Service
//!
//! Issues opaque bearer access tokens for users and lists the unexpired
//! tokens per user, backed by PostgreSQL behind a small JSON API.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::token::{PostgresTokenRepository, TokenService};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Create the application state with all services initialized.
///
/// The connection pool is built exactly once here, before the first request
/// is served, and lives for the rest of the process.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
    info!("PostgreSQL connection established");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    let repository = Arc::new(PostgresTokenRepository::new(pool));
    let token_service = Arc::new(TokenService::new(repository));

    Ok(AppState::new(token_service, resolve_api_key(config)))
}

/// Resolve the gate secret from config or the API_KEY environment variable.
/// An empty value counts as unset, leaving the gate open.
fn resolve_api_key(config: &AppConfig) -> Option<String> {
    config
        .auth
        .api_key
        .clone()
        .or_else(|| std::env::var("API_KEY").ok())
        .filter(|key| !key.is_empty())
}
