//! Repository implementations for database access
//!
//! Repositories wrap a borrowed `SqliteConnection` so that every statement of
//! a request runs on the connection that request acquired.

pub mod contacts;

pub use contacts::{contact_from_row, ContactRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
