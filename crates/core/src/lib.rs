//! TazaBag Core - Shared types library.
//!
//! This crate provides common types used across all TazaBag components:
//! - `server` - REST API for the storefront and admin back office
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and domain logic - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere, including in unit tests for the bag
//! composition rules.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses
//! - [`catalog`] - Product and bag template domain models
//! - [`cart`] - Bag composition engine: cart rules, validity, checkout states

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::*;
pub use catalog::*;
pub use types::*;
