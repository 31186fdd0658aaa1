//! Database layer - connection pool, schema bootstrap and repositories
//!
//! - One process-wide `SqlitePool`, created at startup
//! - Repositories borrow a single connection; they never touch the pool
//! - Multi-statement operations run in a transaction

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::{ContactRepo, DbError};
pub use schema::bootstrap;
