//! CLI command implementations.

pub mod page;
pub mod ping;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use ordergraph_api::db::RepositoryError;
use ordergraph_api::services::ServiceError;
use ordergraph_core::ValidationError;

/// Connections the CLI needs at most.
const MAX_CONNECTIONS: u32 = 2;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: ORDERGRAPH_DATABASE_URL (or DATABASE_URL)")]
    MissingDatabaseUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Invalid demo data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read the database URL the same way the server does.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    ["ORDERGRAPH_DATABASE_URL", "DATABASE_URL"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
        .map(SecretString::from)
        .ok_or(CommandError::MissingDatabaseUrl)
}

/// Connect to the configured database.
async fn connect() -> Result<PgPool, CommandError> {
    let database_url = database_url()?;
    tracing::info!("Connecting to database...");
    let pool = ordergraph_api::db::create_pool(&database_url, MAX_CONNECTIONS).await?;
    Ok(pool)
}
