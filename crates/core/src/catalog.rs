//! Catalog domain models: products and bag templates.
//!
//! These are the shapes shared between the server's repositories, the
//! cart engine, and the CLI seeder. Wire format is camelCase JSON; money
//! fields serialize as decimal strings via `rust_decimal`'s
//! `serde-with-str` feature.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BagCategory, BagTypeId, ProductCategory, ProductId};

/// A single produce item in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    pub price: Decimal,
    /// Sale unit: kg, piece, bunch.
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_info: Option<serde_json::Value>,
}

/// An admin-defined bag bundle: a flat price, an exact item-count limit,
/// and two product slots — fixed items every bag must contain and
/// customizable items the customer may adjust.
///
/// `items_limit` is expected to equal the total slot count at creation
/// time; the client computes it and the server does not re-derive it.
/// The two id sets are disjoint by construction but that is not enforced
/// here — [`crate::cart::Cart`] treats fixed membership as winning when
/// they overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagTemplate {
    pub id: BagTypeId,
    pub name: String,
    pub category: BagCategory,
    pub price: Decimal,
    pub items_limit: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(rename = "fixedItems")]
    pub fixed_item_ids: Vec<ProductId>,
    #[serde(rename = "customizableItems")]
    pub customizable_item_ids: Vec<ProductId>,
}

impl BagTemplate {
    /// Whether the given product is a mandatory (fixed) item of this bag.
    #[must_use]
    pub fn is_fixed_item(&self, product_id: ProductId) -> bool {
        self.fixed_item_ids.contains(&product_id)
    }

    /// Whether the given product is a customizable slot of this bag.
    #[must_use]
    pub fn is_customizable_item(&self, product_id: ProductId) -> bool {
        self.customizable_item_ids.contains(&product_id)
    }
}
