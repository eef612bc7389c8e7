//! Contact message repository.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use tazabag_core::ContactMessageId;

use super::RepositoryError;
use crate::models::ContactMessage;

/// Raw contact_messages row.
#[derive(Debug, FromRow)]
struct ContactMessageRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    is_replied: bool,
    created_at: DateTime<Utc>,
}

impl From<ContactMessageRow> for ContactMessage {
    fn from(row: ContactMessageRow) -> Self {
        Self {
            id: ContactMessageId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            is_replied: row.is_replied,
            created_at: row.created_at,
        }
    }
}

/// Fields for a submitted contact message.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Repository for contact form database operations.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact message; new messages start un-replied.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, msg: &NewContactMessage) -> Result<ContactMessage, RepositoryError> {
        let row: ContactMessageRow = sqlx::query_as(
            r"
            INSERT INTO contact_messages (first_name, last_name, email, phone, subject, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(&msg.first_name)
        .bind(&msg.last_name)
        .bind(&msg.email)
        .bind(&msg.phone)
        .bind(&msg.subject)
        .bind(&msg.message)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List all messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let rows: Vec<ContactMessageRow> =
            sqlx::query_as("SELECT * FROM contact_messages ORDER BY created_at DESC")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(ContactMessage::from).collect())
    }

    /// Mark a message as replied. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the id.
    pub async fn mark_replied(
        &self,
        id: ContactMessageId,
    ) -> Result<ContactMessage, RepositoryError> {
        let row: Option<ContactMessageRow> = sqlx::query_as(
            "UPDATE contact_messages SET is_replied = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(ContactMessage::from)
            .ok_or(RepositoryError::NotFound)
    }
}
