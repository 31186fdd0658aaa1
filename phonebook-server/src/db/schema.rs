//! Schema bootstrap for the contacts table

use sqlx::SqlitePool;

use super::repos::DbError;

const CREATE_CONTACTS: &str = r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        phone TEXT NOT NULL
    )
"#;

const CREATE_NAME_INDEX: &str = "CREATE INDEX IF NOT EXISTS ix_contacts_name ON contacts (name)";

/// Ensure the contacts table and its index exist.
///
/// Idempotent: existing tables and rows are left untouched, so this runs on
/// every startup.
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Bootstrapping contacts schema...");

    let mut tx = pool.begin().await?;
    sqlx::query(CREATE_CONTACTS).execute(&mut *tx).await?;
    sqlx::query(CREATE_NAME_INDEX).execute(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Schema ready");
    Ok(())
}
