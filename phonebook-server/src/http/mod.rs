//! HTTP server layer
//!
//! Axum server with:
//! - One pooled connection per request (`DbConn`)
//! - CORS (localhost only by default)
//! - Request tracing and timeouts
//! - Graceful shutdown
//! - JSON error bodies of the form `{"detail": ...}`

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, serve, AppState, ServerConfig, ServerError};
