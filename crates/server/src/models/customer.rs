//! Customer model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tazabag_core::{CustomerId, Email};

/// A customer record.
///
/// Customers are created implicitly on first order and de-duplicated by
/// email: an order from a known address reuses the existing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}
