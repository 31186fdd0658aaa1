//! phonebook-server: contact list HTTP service
//!
//! A SQLite-backed phone book exposed as JSON under `/api/contacts`.
//! Each request borrows its own pooled connection for the duration of the
//! handler; the schema is bootstrapped once before the listener binds.

pub mod db;
pub mod http;

pub use db::{bootstrap, create_pool, ContactRepo, DbError};
pub use http::{build_router, run_server, serve, ApiError, AppState, ServerConfig, ServerError};
