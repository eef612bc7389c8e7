//! Dashboard stats aggregate.

use rust_decimal::Decimal;
use serde::Serialize;

/// Read-only counters for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_orders: i64,
    /// Sum over `orders.total_amount`; "0" when there are no orders.
    pub total_revenue: Decimal,
    pub total_customers: i64,
    pub total_products: i64,
}
