pub mod deals;
pub mod surveys;

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::config;

/// Errors from the persistence gateway. Surfaced to callers as 500-class
/// responses; never retried here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Process-wide connection pool, created lazily on first use and reused for
/// the process lifetime. A failed connect leaves the cell empty so a later
/// request retries the initialization.
pub async fn pool() -> Result<&'static PgPool, StoreError> {
    POOL.get_or_try_init(connect).await
}

async fn connect() -> Result<PgPool, StoreError> {
    let url =
        std::env::var("DATABASE_URL").map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

    let db = &config::config().database;
    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(Duration::from_secs(db.acquire_timeout_secs))
        .connect(&url)
        .await?;

    tracing::info!("created database pool");
    Ok(pool)
}

/// Pings the store to ensure connectivity.
pub async fn health_check() -> Result<(), StoreError> {
    let pool = pool().await?;
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
