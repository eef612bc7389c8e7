//! Contact message model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tazabag_core::ContactMessageId;

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_replied: bool,
    pub created_at: DateTime<Utc>,
}
