//! Contact endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use phonebook_core::{Contact, NewContact};

use crate::db::ContactRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ContactId, DbConn, ValidJson};
use crate::http::server::AppState;

/// GET /api/contacts - list all contacts
async fn list_contacts(mut db: DbConn) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = ContactRepo::new(&mut db).list().await?;
    Ok(Json(contacts))
}

/// POST /api/contacts - create a contact
///
/// The body is validated before a connection is acquired.
async fn create_contact(
    State(state): State<Arc<AppState>>,
    ValidJson(new): ValidJson<NewContact>,
) -> Result<Json<Contact>, ApiError> {
    let mut db = DbConn::acquire(&state).await?;
    let contact = ContactRepo::new(&mut db).create(&new).await?;

    tracing::info!(id = contact.id, "contact created");
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id} - delete a contact
async fn delete_contact(
    ContactId(id): ContactId,
    mut db: DbConn,
) -> Result<StatusCode, ApiError> {
    ContactRepo::new(&mut db).delete(id).await?;

    tracing::info!(id, "contact deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Contact routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route("/api/contacts/{id}", delete(delete_contact))
}
