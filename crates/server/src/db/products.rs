//! Product repository.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use tazabag_core::{Product, ProductCategory, ProductId};

use super::RepositoryError;

/// Raw products row.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    category: String,
    price: Decimal,
    unit: String,
    image_url: Option<String>,
    description: Option<String>,
    is_available: bool,
    nutrition_info: Option<serde_json::Value>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row.category.parse::<ProductCategory>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product category in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            category,
            price: row.price,
            unit: row.unit,
            image_url: row.image_url,
            description: row.description,
            is_available: row.is_available,
            nutrition_info: row.nutrition_info,
        })
    }
}

/// Fields for creating or replacing a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: ProductCategory,
    pub price: Decimal,
    pub unit: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    pub nutrition_info: Option<serde_json::Value>,
}

/// Listing filters for the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub category: Option<ProductCategory>,
    /// When set, only products with `is_available = true` are returned.
    pub available_only: bool,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by category and availability.
    ///
    /// Unfiltered listings are ordered by category then name; category
    /// listings by name alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a stored category is not a known value.
    pub async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = match (filter.category, filter.available_only) {
            (None, false) => {
                sqlx::query_as(
                    "SELECT * FROM products ORDER BY category, name",
                )
                .fetch_all(self.pool)
                .await?
            }
            (None, true) => {
                sqlx::query_as(
                    "SELECT * FROM products WHERE is_available = TRUE ORDER BY category, name",
                )
                .fetch_all(self.pool)
                .await?
            }
            (Some(category), false) => {
                sqlx::query_as(
                    "SELECT * FROM products WHERE category = $1 ORDER BY name",
                )
                .bind(category.as_str())
                .fetch_all(self.pool)
                .await?
            }
            (Some(category), true) => {
                sqlx::query_as(
                    "SELECT * FROM products \
                     WHERE category = $1 AND is_available = TRUE ORDER BY name",
                )
                .bind(category.as_str())
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as("SELECT * FROM products WHERE id = $1")
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(
            r"
            INSERT INTO products
                (name, category, price, unit, image_url, description, is_available, nutrition_info)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            ",
        )
        .bind(&product.name)
        .bind(product.category.as_str())
        .bind(product.price)
        .bind(&product.unit)
        .bind(&product.image_url)
        .bind(&product.description)
        .bind(product.is_available)
        .bind(&product.nutrition_info)
        .fetch_one(self.pool)
        .await?;

        Product::try_from(row)
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the id.
    pub async fn update(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r"
            UPDATE products
            SET name = $2, category = $3, price = $4, unit = $5,
                image_url = $6, description = $7, is_available = $8, nutrition_info = $9
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(&product.name)
        .bind(product.category.as_str())
        .bind(product.price)
        .bind(&product.unit)
        .bind(&product.image_url)
        .bind(&product.description)
        .bind(product.is_available)
        .bind(&product.nutrition_info)
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), Product::try_from)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the id.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
