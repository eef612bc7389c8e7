//! Integration tests for TazaBag.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations and start the server
//! cargo run -p tazabag-cli -- migrate
//! cargo run -p tazabag-server
//!
//! # Run integration tests (ignored by default)
//! cargo test -p tazabag-integration-tests -- --ignored
//! ```
//!
//! Tests hit a running server over HTTP and create real rows; point
//! `TAZABAG_BASE_URL` at a disposable database.

use reqwest::Client;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("TAZABAG_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client for tests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique suffix for test data, so runs never collide.
#[must_use]
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
