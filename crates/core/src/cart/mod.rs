//! Bag composition engine.
//!
//! A cart always belongs to exactly one [`BagTemplate`]. Selecting a
//! template derives the initial cart (fixed + customizable lines, one
//! unit each); every mutation afterwards is gated by the single
//! [`Cart::is_fixed_item`] predicate so mandatory items can never be
//! discarded, duplicated, or resized. Checkout is blocked until the cart
//! holds exactly `items_limit` units — strict equality, not a threshold.

pub mod checkout;

pub use checkout::{SubmissionState, TransitionError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{BagTemplate, Product};
use crate::types::{BagTypeId, ProductId};

/// One entry in an in-progress bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub is_fixed: bool,
}

/// A customer's in-progress bag.
///
/// Mutations are synchronous and fully ordered; there is no partial or
/// cancellable update. The cart is ephemeral — persistence happens only
/// through [`Cart::snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    template: BagTemplate,
    lines: Vec<CartLine>,
}

impl Cart {
    /// Derive the initial cart for a bag template from the catalog.
    ///
    /// Catalog products listed in the template's fixed slots become fixed
    /// lines, those in the customizable slots become customizable lines,
    /// each with quantity 1. Products in neither set are excluded. This
    /// replaces any previous cart wholesale. An empty intersection yields
    /// an empty cart — degenerate but valid.
    ///
    /// A product appearing in both sets becomes a fixed line only: fixed
    /// membership wins everywhere in this engine.
    #[must_use]
    pub fn from_template(template: BagTemplate, catalog: &[Product]) -> Self {
        let fixed = catalog
            .iter()
            .filter(|p| template.is_fixed_item(p.id))
            .map(|p| CartLine {
                product: p.clone(),
                quantity: 1,
                is_fixed: true,
            });

        let customizable = catalog
            .iter()
            .filter(|p| template.is_customizable_item(p.id) && !template.is_fixed_item(p.id))
            .map(|p| CartLine {
                product: p.clone(),
                quantity: 1,
                is_fixed: false,
            });

        let lines = fixed.chain(customizable).collect();
        Self { template, lines }
    }

    /// The bag template this cart was built from.
    #[must_use]
    pub const fn template(&self) -> &BagTemplate {
        &self.template
    }

    /// The current cart lines, fixed lines first.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the product is a mandatory item of the active template.
    ///
    /// This is the sole gate consulted by every mutation path.
    #[must_use]
    pub fn is_fixed_item(&self, product_id: ProductId) -> bool {
        self.template.is_fixed_item(product_id)
    }

    /// Add `quantity` units of a product.
    ///
    /// No-op for fixed items — they are already in the bag and cannot be
    /// duplicated. If a non-fixed line for the product exists, the
    /// quantities are summed; otherwise a new customizable line is
    /// appended.
    pub fn add_line(&mut self, product: &Product, quantity: u32) {
        if self.is_fixed_item(product.id) {
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product.id == product.id && !l.is_fixed)
        {
            line.quantity += quantity;
            return;
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
            is_fixed: false,
        });
    }

    /// Overwrite the quantity of a non-fixed line.
    ///
    /// No-op when the line is fixed. A quantity of zero removes the line,
    /// same as [`Cart::remove_line`].
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if self.is_fixed_item(product_id) {
            return;
        }

        if quantity == 0 {
            self.remove_line(product_id);
            return;
        }

        for line in &mut self.lines {
            if line.product.id == product_id && !line.is_fixed {
                line.quantity = quantity;
            }
        }
    }

    /// Remove a line unless it is fixed.
    pub fn remove_line(&mut self, product_id: ProductId) {
        self.lines
            .retain(|l| l.product.id != product_id || l.is_fixed);
    }

    /// Total unit count across all lines, fixed lines included.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Whether checkout may proceed.
    ///
    /// The bag must contain exactly `items_limit` units; both overshoot
    /// and undershoot are invalid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        u32::try_from(self.template.items_limit)
            .is_ok_and(|limit| self.total_item_count() == limit)
    }

    /// The amount charged for this bag: the template's flat price.
    ///
    /// Individual product prices are informational for bag orders; see
    /// [`Cart::line_subtotal`] for the per-line sum shown on receipts.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.template.price
    }

    /// Sum of `price * quantity` over all lines.
    ///
    /// Not what the customer pays — the bag price is flat — but order
    /// items freeze per-line unit prices and receipts show this subtotal.
    #[must_use]
    pub fn line_subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.product.price * Decimal::from(l.quantity))
            .sum()
    }

    /// Freeze the cart into a serializable snapshot.
    ///
    /// The snapshot bridges the product-selection step and checkout (it
    /// is what gets persisted to local device storage) and is cleared on
    /// successful submission.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            bag_type_id: self.template.id,
            lines: self
                .lines
                .iter()
                .map(|l| SnapshotLine {
                    product_id: l.product.id,
                    quantity: l.quantity,
                    unit_price: l.product.price,
                    is_fixed: l.is_fixed,
                })
                .collect(),
        }
    }
}

/// Frozen copy of a cart, persisted between selection and checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub bag_type_id: BagTypeId,
    pub lines: Vec<SnapshotLine>,
}

/// One frozen cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub is_fixed: bool,
}

/// An order line as submitted to `POST /orders`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Why a submitted item set does not satisfy its bag template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    /// Total unit count differs from the template's items limit.
    #[error("bag must contain exactly {expected} items, got {actual}")]
    CountMismatch { expected: i32, actual: u32 },
    /// A mandatory item is missing from the submission.
    #[error("fixed item {0} is missing from the bag")]
    MissingFixedItem(ProductId),
    /// A mandatory item was submitted with a quantity other than 1.
    #[error("fixed item {product_id} must have quantity 1, got {quantity}")]
    FixedQuantityChanged { product_id: ProductId, quantity: u32 },
}

/// Re-check a submitted item set against its bag template.
///
/// The storefront enforces these rules interactively, but the order
/// endpoint verifies them again so a hand-crafted request cannot drop a
/// mandatory item or dodge the items limit.
///
/// # Errors
///
/// Returns the first violated rule: count mismatch, missing fixed item,
/// or a fixed item with quantity other than 1.
pub fn verify_submission(
    template: &BagTemplate,
    items: &[SubmittedItem],
) -> Result<(), CompositionError> {
    let total: u32 = items.iter().map(|i| i.quantity).sum();
    let expected = template.items_limit;
    if u32::try_from(expected) != Ok(total) {
        return Err(CompositionError::CountMismatch {
            expected,
            actual: total,
        });
    }

    for &fixed_id in &template.fixed_item_ids {
        match items.iter().find(|i| i.product_id == fixed_id) {
            None => return Err(CompositionError::MissingFixedItem(fixed_id)),
            Some(item) if item.quantity != 1 => {
                return Err(CompositionError::FixedQuantityChanged {
                    product_id: fixed_id,
                    quantity: item.quantity,
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BagCategory, ProductCategory};

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            category: ProductCategory::Fruit,
            price: price.parse().expect("decimal"),
            unit: "kg".to_owned(),
            image_url: None,
            description: None,
            is_available: true,
            nutrition_info: None,
        }
    }

    fn template(fixed: &[i32], customizable: &[i32], limit: i32) -> BagTemplate {
        BagTemplate {
            id: BagTypeId::new(1),
            name: "Starter".to_owned(),
            category: BagCategory::Fruit,
            price: "500.00".parse().expect("decimal"),
            items_limit: limit,
            description: None,
            is_active: true,
            fixed_item_ids: fixed.iter().copied().map(ProductId::new).collect(),
            customizable_item_ids: customizable.iter().copied().map(ProductId::new).collect(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "120.00"),
            product(2, "80.00"),
            product(3, "150.00"),
            product(4, "60.00"),
            product(5, "95.00"),
        ]
    }

    #[test]
    fn test_from_template_partitions_catalog() {
        let cart = Cart::from_template(template(&[1, 2], &[3, 4], 4), &catalog());

        let fixed_ids: Vec<i32> = cart
            .lines()
            .iter()
            .filter(|l| l.is_fixed)
            .map(|l| l.product.id.as_i32())
            .collect();
        let customizable_ids: Vec<i32> = cart
            .lines()
            .iter()
            .filter(|l| !l.is_fixed)
            .map(|l| l.product.id.as_i32())
            .collect();

        assert_eq!(fixed_ids, vec![1, 2]);
        assert_eq!(customizable_ids, vec![3, 4]);
        assert!(cart.lines().iter().all(|l| l.quantity == 1));
        // product 5 belongs to neither slot set
        assert!(!cart.lines().iter().any(|l| l.product.id.as_i32() == 5));
    }

    #[test]
    fn test_from_template_empty_intersection() {
        let cart = Cart::from_template(template(&[10, 11], &[12], 3), &catalog());
        assert!(cart.lines().is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_from_template_overlap_fixed_wins() {
        // product 3 listed in both sets: one fixed line, no duplicate
        let cart = Cart::from_template(template(&[3], &[3, 4], 2), &catalog());
        let lines: Vec<_> = cart
            .lines()
            .iter()
            .filter(|l| l.product.id.as_i32() == 3)
            .collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_fixed);
    }

    #[test]
    fn test_add_line_rejects_fixed() {
        let products = catalog();
        let mut cart = Cart::from_template(template(&[1, 2], &[3], 3), &products);
        let before = cart.lines().to_vec();

        cart.add_line(&products[0], 2); // product 1 is fixed

        assert_eq!(cart.lines(), before.as_slice());
    }

    #[test]
    fn test_add_line_merges_quantities() {
        let products = catalog();
        let mut cart = Cart::from_template(template(&[1], &[], 5), &products);

        cart.add_line(&products[4], 2); // product 5
        cart.add_line(&products[4], 3);

        let matching: Vec<_> = cart
            .lines()
            .iter()
            .filter(|l| l.product.id.as_i32() == 5)
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].quantity, 5);
    }

    #[test]
    fn test_remove_line_ignores_fixed() {
        let products = catalog();
        let mut cart = Cart::from_template(template(&[1, 2], &[3], 3), &products);
        let count_before = cart.lines().len();

        cart.remove_line(ProductId::new(1));
        assert_eq!(cart.lines().len(), count_before);

        cart.remove_line(ProductId::new(3));
        assert_eq!(cart.lines().len(), count_before - 1);
    }

    #[test]
    fn test_set_quantity_ignores_fixed() {
        let products = catalog();
        let mut cart = Cart::from_template(template(&[1], &[3], 2), &products);

        cart.set_quantity(ProductId::new(1), 0);
        cart.set_quantity(ProductId::new(1), 9);

        let fixed = cart
            .lines()
            .iter()
            .find(|l| l.product.id.as_i32() == 1)
            .expect("fixed line present");
        assert_eq!(fixed.quantity, 1);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let products = catalog();
        let mut cart = Cart::from_template(template(&[], &[3], 1), &products);

        cart.set_quantity(ProductId::new(3), 0);
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let products = catalog();
        let mut cart = Cart::from_template(template(&[], &[3], 4), &products);

        cart.set_quantity(ProductId::new(3), 4);
        assert_eq!(cart.total_item_count(), 4);
    }

    #[test]
    fn test_is_valid_exact_equality() {
        let products = catalog();
        let mut cart = Cart::from_template(template(&[1, 2], &[3], 5), &products);

        // 3 units: undershoot
        assert_eq!(cart.total_item_count(), 3);
        assert!(!cart.is_valid());

        // 5 units: exact
        cart.set_quantity(ProductId::new(3), 3);
        assert_eq!(cart.total_item_count(), 5);
        assert!(cart.is_valid());

        // 6 units: overshoot
        cart.set_quantity(ProductId::new(3), 4);
        assert_eq!(cart.total_item_count(), 6);
        assert!(!cart.is_valid());
    }

    #[test]
    fn test_total_is_flat_bag_price() {
        let products = catalog();
        let mut cart = Cart::from_template(template(&[1, 2], &[3], 5), &products);
        cart.set_quantity(ProductId::new(3), 3);

        assert_eq!(cart.total(), "500.00".parse::<Decimal>().expect("decimal"));
        // line subtotal diverges from the flat price by design
        assert_eq!(
            cart.line_subtotal(),
            "650.00".parse::<Decimal>().expect("decimal")
        );
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let products = catalog();
        let cart = Cart::from_template(template(&[1], &[3], 2), &products);
        let snapshot = cart.snapshot();

        assert_eq!(snapshot.bag_type_id, BagTypeId::new(1));
        assert_eq!(snapshot.lines.len(), 2);
        assert!(snapshot.lines[0].is_fixed);

        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: CartSnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_verify_submission_ok() {
        let t = template(&[1, 2], &[3, 4], 4);
        let items = [
            SubmittedItem { product_id: ProductId::new(1), quantity: 1 },
            SubmittedItem { product_id: ProductId::new(2), quantity: 1 },
            SubmittedItem { product_id: ProductId::new(3), quantity: 2 },
        ];
        assert_eq!(verify_submission(&t, &items), Ok(()));
    }

    #[test]
    fn test_verify_submission_count_mismatch() {
        let t = template(&[1], &[3], 5);
        let items = [
            SubmittedItem { product_id: ProductId::new(1), quantity: 1 },
            SubmittedItem { product_id: ProductId::new(3), quantity: 3 },
        ];
        assert_eq!(
            verify_submission(&t, &items),
            Err(CompositionError::CountMismatch { expected: 5, actual: 4 })
        );
    }

    #[test]
    fn test_verify_submission_missing_fixed() {
        let t = template(&[1, 2], &[3], 3);
        let items = [
            SubmittedItem { product_id: ProductId::new(1), quantity: 1 },
            SubmittedItem { product_id: ProductId::new(3), quantity: 2 },
        ];
        assert_eq!(
            verify_submission(&t, &items),
            Err(CompositionError::MissingFixedItem(ProductId::new(2)))
        );
    }

    #[test]
    fn test_verify_submission_fixed_quantity_changed() {
        let t = template(&[1], &[3], 3);
        let items = [SubmittedItem { product_id: ProductId::new(1), quantity: 3 }];
        assert_eq!(
            verify_submission(&t, &items),
            Err(CompositionError::FixedQuantityChanged {
                product_id: ProductId::new(1),
                quantity: 3,
            })
        );
    }
}
