//! HTTP route handlers for the TazaBag API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (DB ping)
//!
//! # Catalog
//! GET    /products             - Product listing (?category=&available=)
//! POST   /products             - Create product
//! PUT    /products/{id}        - Replace product
//! DELETE /products/{id}        - Delete product
//!
//! # Bag templates
//! GET    /bag-types            - Active templates, cheapest first
//! POST   /bag-types            - Create template + slot associations
//! PUT    /bag-types/{id}       - Replace template, slots wholesale
//! DELETE /bag-types/{id}       - Delete template (slots cascade)
//!
//! # Orders
//! POST /orders                 - Submit order (composition verified)
//! GET  /orders                 - All orders, newest first
//! GET  /orders/{id}            - One order with customer/bag/items
//! PUT  /orders/{id}/status     - Update fulfillment status
//! PUT  /orders/{id}/payment    - Update payment status
//!
//! # Contact
//! POST /contact                - Submit contact message
//! GET  /contact                - Inbox, newest first
//! PUT  /contact/{id}/reply     - Mark replied
//!
//! # Admin
//! GET  /stats                  - Dashboard counters
//! POST /users                  - Create back-office account
//! GET  /users/{id}             - Account by id
//! GET  /users/username/{name}  - Account by username
//! ```

pub mod bag_types;
pub mod contact;
pub mod orders;
pub mod products;
pub mod stats;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/{id}", put(products::update).delete(products::delete))
}

/// Create the bag template routes router.
pub fn bag_type_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bag_types::list).post(bag_types::create))
        .route("/{id}", put(bag_types::update).delete(bag_types::delete))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route("/{id}", get(orders::get))
        .route("/{id}/status", put(orders::update_status))
        .route("/{id}/payment", put(orders::update_payment))
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list).post(contact::create))
        .route("/{id}/reply", put(contact::mark_replied))
}

/// Create the back-office user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create))
        .route("/{id}", get(users::get))
        .route("/username/{username}", get(users::get_by_username))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/bag-types", bag_type_routes())
        .nest("/orders", order_routes())
        .nest("/contact", contact_routes())
        .route("/stats", get(stats::summary))
        .nest("/users", user_routes())
}
