//! Pool construction and schema bootstrap.

use core::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::StorageResult;

const SCHEMA: &str = include_str!("schema.sql");

/// Open (creating if missing) the SQLite database at `url` and apply the
/// schema.
pub async fn connect(url: &str) -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    tracing::info!(url, "database ready");
    Ok(pool)
}

/// Fresh in-memory database with the schema applied.
///
/// Single connection: each SQLite `:memory:` connection is its own
/// database, so a larger pool would hand out empty ones.
pub async fn connect_in_memory() -> StorageResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true))
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Apply `schema.sql`; every statement is `IF NOT EXISTS`, so this is
/// idempotent.
pub async fn init_schema(pool: &SqlitePool) -> StorageResult<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
