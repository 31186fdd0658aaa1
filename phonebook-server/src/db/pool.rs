//! Database connection pool management
//!
//! Uses a sqlx `SqlitePool` with explicit connection limits. The pool is the
//! only process-wide storage state; handlers borrow one connection each.

use std::time::Duration;

use phonebook_core::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use super::repos::DbError;

/// Create the SQLite pool described by `config`.
///
/// The database file and its parent directory are created when missing. One
/// connection is opened eagerly so an unusable location fails here rather than
/// on the first request.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// opened.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::at("phonebook.db")).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout());

    create_pool_with_options(options, config.max_connections, config.acquire_timeout()).await
}

/// Create a SQLite pool from explicit connect options.
///
/// # Arguments
///
/// * `options` - SQLite connect options (file, journal mode, timeouts)
/// * `max_connections` - Maximum number of connections in the pool
/// * `acquire_timeout` - How long `acquire` waits before giving up
pub async fn create_pool_with_options(
    options: SqliteConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<SqlitePool, DbError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await?;
    Ok(pool)
}
