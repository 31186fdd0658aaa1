//! Custom Axum extractors

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection};

use super::error::ApiError;
use super::server::AppState;
use crate::db::DbError;

/// A pooled connection scoped to one request.
///
/// Acquired when the handler is entered and returned to the pool when the
/// handler's future finishes or is dropped, whichever way it exits.
pub struct DbConn(pub PoolConnection<Sqlite>);

impl DbConn {
    /// Acquire a connection from the shared pool
    pub async fn acquire(state: &AppState) -> Result<Self, ApiError> {
        let conn = state.pool.acquire().await.map_err(DbError::from)?;
        Ok(Self(conn))
    }
}

impl Deref for DbConn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromRequestParts<Arc<AppState>> for DbConn {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Self::acquire(state).await
    }
}

/// JSON body whose parse failures become 422 `{"detail": ...}` responses
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation {
                message: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Extract an integer contact id from the path
pub struct ContactId(pub i64);

impl<S> FromRequestParts<S> for ContactId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation {
                message: rejection.body_text(),
            })?;
        Ok(Self(id))
    }
}
