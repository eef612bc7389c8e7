//! Database operations for the TazaBag `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `products` - Catalog items
//! - `bag_types` - Bag templates, plus `bag_fixed_items` /
//!   `bag_customizable_items` association rows
//! - `customers` - Created implicitly on first order, de-duplicated by email
//! - `orders` / `order_items` - Submitted orders with frozen cart lines
//! - `contact_messages` - Contact form inbox
//! - `users` - Back-office accounts
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p tazabag-cli -- migrate
//! ```
//!
//! Queries are runtime-checked (`sqlx::query_as`) with small `FromRow`
//! structs; rows are converted to domain types at the repository
//! boundary, treating unparseable stored text as data corruption.

pub mod bag_types;
pub mod contact;
pub mod orders;
pub mod products;
pub mod stats;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use bag_types::BagTypeRepository;
pub use contact::ContactRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
