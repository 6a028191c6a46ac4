//! Database Module
//!
//! SQLite connection pools and migrations

pub mod repository;

use shared::error::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

const READER_CONNECTIONS: u32 = 5;

/// Reader and writer pools over the same SQLite file
///
/// Mutation transactions must begin on `writer` (one connection). Two
/// deferred transactions that read before writing cannot both take the
/// write lock; SQLite fails one with SQLITE_BUSY without waiting.
#[derive(Debug, Clone)]
pub struct Database {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

/// Open both pools (WAL, foreign keys on) and apply migrations
pub async fn connect(database_url: &str) -> Result<Database, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::database(format!("Invalid database url: {e}")))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(5));

    let writer = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options.clone())
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    migrate(&writer).await?;

    let reader = SqlitePoolOptions::new()
        .max_connections(READER_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    tracing::info!(
        readers = READER_CONNECTIONS,
        "Database connection established (SQLite WAL, single writer, busy_timeout=5000ms)"
    );

    Ok(Database { reader, writer })
}

/// Apply pending migrations
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// In-memory pool for tests: one connection that never recycles, so the
/// database outlives individual queries.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    pool
}
