//! Back-office user model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tazabag_core::UserId;

/// A back-office user account.
///
/// The password hash never leaves the database layer; this type is safe
/// to serialize into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// "user" or "admin".
    pub role: String,
    pub created_at: DateTime<Utc>,
}
