//! Order and customer repository.
//!
//! Order submission is a three-step write — customer lookup-or-create,
//! order insert, order-item inserts — wrapped in a single transaction so
//! a failure at any step leaves no orphaned customer or item-less order
//! behind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use tazabag_core::{
    BagTypeId, CustomerId, Email, OrderId, OrderItemId, OrderStatus, PaymentMethod, PaymentStatus,
    Product, ProductCategory, ProductId,
};

use super::{BagTypeRepository, RepositoryError};
use crate::models::{Customer, Order, OrderDetails, OrderItem, OrderItemDetails};

/// Raw customers row.
#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            created_at: row.created_at,
        })
    }
}

/// Raw orders row.
#[derive(Debug, FromRow)]
struct OrderRow {
    id: i32,
    customer_id: i32,
    bag_type_id: i32,
    total_amount: Decimal,
    payment_method: String,
    payment_status: String,
    order_status: String,
    delivery_date: Option<DateTime<Utc>>,
    special_instructions: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let corrupt = |e: tazabag_core::UnknownStatus| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        };

        Ok(Self {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            bag_type_id: BagTypeId::new(row.bag_type_id),
            total_amount: row.total_amount,
            payment_method: row.payment_method.parse::<PaymentMethod>().map_err(corrupt)?,
            payment_status: row.payment_status.parse::<PaymentStatus>().map_err(corrupt)?,
            order_status: row.order_status.parse::<OrderStatus>().map_err(corrupt)?,
            delivery_date: row.delivery_date,
            special_instructions: row.special_instructions,
            created_at: row.created_at,
        })
    }
}

/// Raw order_items row joined with its product.
#[derive(Debug, FromRow)]
struct ItemWithProductRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    quantity: i32,
    unit_price: Decimal,
    product_name: String,
    product_category: String,
    product_price: Decimal,
    product_unit: String,
    product_image_url: Option<String>,
    product_description: Option<String>,
    product_is_available: bool,
    product_nutrition_info: Option<serde_json::Value>,
}

impl TryFrom<ItemWithProductRow> for OrderItemDetails {
    type Error = RepositoryError;

    fn try_from(row: ItemWithProductRow) -> Result<Self, Self::Error> {
        let category = row.product_category.parse::<ProductCategory>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product category in database: {e}"))
        })?;

        Ok(Self {
            item: OrderItem {
                id: OrderItemId::new(row.id),
                order_id: OrderId::new(row.order_id),
                product_id: ProductId::new(row.product_id),
                quantity: row.quantity,
                unit_price: row.unit_price,
            },
            product: Product {
                id: ProductId::new(row.product_id),
                name: row.product_name,
                category,
                price: row.product_price,
                unit: row.product_unit,
                image_url: row.product_image_url,
                description: row.product_description,
                is_available: row.product_is_available,
                nutrition_info: row.product_nutrition_info,
            },
        })
    }
}

/// Customer fields for the lookup-or-create step.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
}

/// One frozen cart line in an order submission.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// A full order submission.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer: NewCustomer,
    pub bag_type_id: BagTypeId,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
    pub items: Vec<NewOrderItem>,
}

/// Repository for order and customer database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order.
    ///
    /// Runs the customer lookup-or-create (matched by email), the order
    /// insert, and the item inserts in one transaction. New orders start
    /// as `processing` / `pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any step fails; nothing is
    /// persisted in that case.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<CustomerRow> =
            sqlx::query_as("SELECT * FROM customers WHERE email = $1 LIMIT 1")
                .bind(new.customer.email.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        let customer_id = match existing {
            Some(row) => row.id,
            None => {
                let row: CustomerRow = sqlx::query_as(
                    r"
                    INSERT INTO customers (first_name, last_name, email, phone, address, city)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING *
                    ",
                )
                .bind(&new.customer.first_name)
                .bind(&new.customer.last_name)
                .bind(new.customer.email.as_str())
                .bind(&new.customer.phone)
                .bind(&new.customer.address)
                .bind(&new.customer.city)
                .fetch_one(&mut *tx)
                .await?;
                row.id
            }
        };

        let order_row: OrderRow = sqlx::query_as(
            r"
            INSERT INTO orders
                (customer_id, bag_type_id, total_amount, payment_method,
                 payment_status, order_status, special_instructions)
            VALUES ($1, $2, $3, $4, 'pending', 'processing', $5)
            RETURNING *
            ",
        )
        .bind(customer_id)
        .bind(new.bag_type_id.as_i32())
        .bind(new.total_amount)
        .bind(new.payment_method.as_str())
        .bind(&new.special_instructions)
        .fetch_one(&mut *tx)
        .await?;

        for item in &new.items {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_row.id)
            .bind(item.product_id.as_i32())
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Order::try_from(order_row)
    }

    /// List all orders, newest first, with customer, bag template, and
    /// items-with-product resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `DataCorruption` if a referenced row is missing or unparseable.
    pub async fn list(&self) -> Result<Vec<OrderDetails>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(self.pool)
            .await?;

        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.resolve_details(row).await?);
        }
        Ok(details)
    }

    /// Get one order with customer, bag template, and items resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<OrderDetails>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.resolve_details(row).await?)),
            None => Ok(None),
        }
    }

    /// Update the fulfillment status. Any status may move to any other.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the id.
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row: Option<OrderRow> =
            sqlx::query_as("UPDATE orders SET order_status = $2 WHERE id = $1 RETURNING *")
                .bind(id.as_i32())
                .bind(status.as_str())
                .fetch_optional(self.pool)
                .await?;

        row.map_or(Err(RepositoryError::NotFound), Order::try_from)
    }

    /// Update the payment status. Any status may move to any other.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the id.
    pub async fn update_payment_status(
        &self,
        id: OrderId,
        status: PaymentStatus,
    ) -> Result<Order, RepositoryError> {
        let row: Option<OrderRow> =
            sqlx::query_as("UPDATE orders SET payment_status = $2 WHERE id = $1 RETURNING *")
                .bind(id.as_i32())
                .bind(status.as_str())
                .fetch_optional(self.pool)
                .await?;

        row.map_or(Err(RepositoryError::NotFound), Order::try_from)
    }

    async fn resolve_details(&self, row: OrderRow) -> Result<OrderDetails, RepositoryError> {
        let customer_row: CustomerRow = sqlx::query_as("SELECT * FROM customers WHERE id = $1")
            .bind(row.customer_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "order {} references missing customer {}",
                    row.id, row.customer_id
                ))
            })?;

        let bag_type = BagTypeRepository::new(self.pool)
            .get(BagTypeId::new(row.bag_type_id))
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "order {} references missing bag type {}",
                    row.id, row.bag_type_id
                ))
            })?;

        let item_rows: Vec<ItemWithProductRow> = sqlx::query_as(
            r"
            SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.unit_price,
                   p.name AS product_name, p.category AS product_category,
                   p.price AS product_price, p.unit AS product_unit,
                   p.image_url AS product_image_url, p.description AS product_description,
                   p.is_available AS product_is_available,
                   p.nutrition_info AS product_nutrition_info
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            ",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        let order = Order::try_from(row)?;
        let customer = Customer::try_from(customer_row)?;
        let order_items = item_rows
            .into_iter()
            .map(OrderItemDetails::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderDetails {
            order,
            customer,
            bag_type,
            order_items,
        })
    }
}
