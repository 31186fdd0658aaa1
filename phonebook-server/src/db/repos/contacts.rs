//! Contact repository
//!
//! - list: full scan ordered by id
//! - create: INSERT then re-read by the generated id, one transaction
//! - delete: existence check then DELETE, one transaction

use phonebook_core::{Contact, NewContact};
use sqlx::sqlite::SqliteRow;
use sqlx::{Connection, Row, SqliteConnection};

use super::DbError;

const SELECT_ALL: &str = "SELECT id, name, phone FROM contacts ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, name, phone FROM contacts WHERE id = ?";

/// Map a `contacts` row to a [`Contact`].
pub fn contact_from_row(row: &SqliteRow) -> Result<Contact, sqlx::Error> {
    Ok(Contact {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
    })
}

/// Contact repository over a single borrowed connection
pub struct ContactRepo<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ContactRepo<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List every contact, lowest id first.
    pub async fn list(&mut self) -> Result<Vec<Contact>, DbError> {
        let rows = sqlx::query(SELECT_ALL).fetch_all(&mut *self.conn).await?;

        let contacts = rows
            .iter()
            .map(contact_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    /// Get a single contact by id.
    pub async fn get(&mut self, id: i64) -> Result<Contact, DbError> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or(DbError::NotFound {
                resource: "contact",
                id,
            })?;

        Ok(contact_from_row(&row)?)
    }

    /// Insert a contact and return it with its generated id.
    ///
    /// The row is read back inside the insert transaction so the caller sees
    /// exactly what was persisted.
    pub async fn create(&mut self, new: &NewContact) -> Result<Contact, DbError> {
        let mut tx = self.conn.begin().await?;

        let id = sqlx::query("INSERT INTO contacts (name, phone) VALUES (?, ?)")
            .bind(&new.name)
            .bind(&new.phone)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let contact = contact_from_row(&row)?;

        tx.commit().await?;
        Ok(contact)
    }

    /// Delete a contact by id.
    ///
    /// Returns `DbError::NotFound` when no row has that id; the transaction
    /// is rolled back on drop in that case.
    pub async fn delete(&mut self, id: i64) -> Result<(), DbError> {
        let mut tx = self.conn.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM contacts WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_none() {
            return Err(DbError::NotFound {
                resource: "contact",
                id,
            });
        }

        sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
