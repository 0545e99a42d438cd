//! Database connectivity check.

use super::{CommandError, connect};

/// Connect and evaluate `SELECT 1 + 1`.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the query fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let solution: i32 = sqlx::query_scalar("SELECT 1 + 1").fetch_one(&pool).await?;
    tracing::info!(solution, "Database connection OK");

    pool.close().await;
    Ok(())
}
