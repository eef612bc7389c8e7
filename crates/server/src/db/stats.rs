//! Dashboard stats queries.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::RepositoryError;
use crate::models::StatsSummary;

#[derive(Debug, FromRow)]
struct StatsRow {
    total_orders: i64,
    total_revenue: Decimal,
    total_customers: i64,
    total_products: i64,
}

/// Compute the admin dashboard counters in a single round trip.
///
/// Revenue sums `orders.total_amount` and is `0` when there are no
/// orders.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn summary(pool: &PgPool) -> Result<StatsSummary, RepositoryError> {
    let row: StatsRow = sqlx::query_as(
        r"
        SELECT
            (SELECT COUNT(*) FROM orders) AS total_orders,
            (SELECT COALESCE(SUM(total_amount), 0) FROM orders) AS total_revenue,
            (SELECT COUNT(*) FROM customers) AS total_customers,
            (SELECT COUNT(*) FROM products) AS total_products
        ",
    )
    .fetch_one(pool)
    .await?;

    Ok(StatsSummary {
        total_orders: row.total_orders,
        total_revenue: row.total_revenue,
        total_customers: row.total_customers,
        total_products: row.total_products,
    })
}
