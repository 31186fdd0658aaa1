//! API error types with IntoResponse
//!
//! Every error renders as `{"detail": "<reason>"}` with a matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body or path failed to parse (422)
    Validation { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: i64 },

    /// No route matched (404)
    RouteNotFound,

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Request exceeded the configured timeout (408)
    Timeout,

    /// Middleware failure outside the handlers (500, logged)
    Internal { message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// No connection became available in time (503)
    Unavailable { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Human-readable reason placed in the `detail` field
    pub fn detail(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::NotFound { resource, .. } => format!("{} not found", capitalize(resource)),
            Self::RouteNotFound => "Not Found".to_string(),
            Self::MethodNotAllowed => "Method Not Allowed".to_string(),
            Self::Timeout => "Request Timeout".to_string(),
            Self::Database(_) | Self::Internal { .. } => "Internal Server Error".to_string(),
            Self::Unavailable { .. } => "Service Unavailable".to_string(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::Unavailable { message } => tracing::warn!("Storage unavailable: {}", message),
            Self::NotFound { resource, id } => tracing::debug!(resource, id, "not found"),
            Self::Validation { message } => tracing::debug!("Rejected request: {}", message),
            Self::Internal { message } => tracing::error!("Middleware error: {}", message),
            Self::Timeout => tracing::warn!("Request timed out"),
            Self::RouteNotFound | Self::MethodNotAllowed => {}
        }

        let body = Json(json!({ "detail": self.detail() }));
        (self.status(), body).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Sqlx(sqlx::Error::PoolTimedOut) => Self::Unavailable {
                message: "timed out waiting for a database connection".to_string(),
            },
            _ => Self::Database(e),
        }
    }
}
