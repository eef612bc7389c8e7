//! Server-side domain models.
//!
//! Catalog models (`Product`, `BagTemplate`) live in `tazabag-core`
//! because the cart engine needs them; everything that only the server
//! touches lives here.

pub mod contact;
pub mod customer;
pub mod order;
pub mod stats;
pub mod user;

pub use contact::ContactMessage;
pub use customer::Customer;
pub use order::{Order, OrderDetails, OrderItem, OrderItemDetails};
pub use stats::StatsSummary;
pub use user::User;
