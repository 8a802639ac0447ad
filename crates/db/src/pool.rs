//! Postgres connection pool.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::{DbError, PgStore};

/// The shared Postgres pool behind every [`PgStore`].
pub type DbPool = PgPool;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool against `database_url` holding at most `max_connections`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    info!(max_connections, "connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Open a pool and wrap it in a [`PgStore`] ready for the repositories.
pub async fn connect_store(database_url: &str, max_connections: u32) -> Result<PgStore, DbError> {
    create_pool(database_url, max_connections)
        .await
        .map(PgStore::new)
}
