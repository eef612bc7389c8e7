//! Bag template repository.
//!
//! Bag templates own two many-to-many association tables
//! (`bag_fixed_items`, `bag_customizable_items`). Updates use
//! replace-children semantics: all existing association rows are deleted
//! and the new lists inserted, inside one transaction so a concurrent
//! reader never observes a template with half its slots.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use tazabag_core::{BagCategory, BagTemplate, BagTypeId, ProductId};

use super::RepositoryError;

/// Raw bag_types row.
#[derive(Debug, FromRow)]
struct BagTypeRow {
    id: i32,
    name: String,
    category: String,
    price: Decimal,
    items_limit: i32,
    description: Option<String>,
    is_active: bool,
}

impl BagTypeRow {
    fn into_template(
        self,
        fixed_item_ids: Vec<ProductId>,
        customizable_item_ids: Vec<ProductId>,
    ) -> Result<BagTemplate, RepositoryError> {
        let category = self.category.parse::<BagCategory>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid bag category in database: {e}"))
        })?;

        Ok(BagTemplate {
            id: BagTypeId::new(self.id),
            name: self.name,
            category,
            price: self.price,
            items_limit: self.items_limit,
            description: self.description,
            is_active: self.is_active,
            fixed_item_ids,
            customizable_item_ids,
        })
    }
}

/// Fields for creating or replacing a bag template.
///
/// `items_limit` is taken as sent; the client computes it from the slot
/// counts and the server does not re-derive it.
#[derive(Debug, Clone)]
pub struct NewBagType {
    pub name: String,
    pub category: BagCategory,
    pub price: Decimal,
    pub items_limit: i32,
    pub description: Option<String>,
    pub is_active: bool,
    pub fixed_items: Vec<ProductId>,
    pub customizable_items: Vec<ProductId>,
}

/// Repository for bag template database operations.
pub struct BagTypeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BagTypeRepository<'a> {
    /// Create a new bag type repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active bag templates ordered by price, children resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_active(&self) -> Result<Vec<BagTemplate>, RepositoryError> {
        let rows: Vec<BagTypeRow> =
            sqlx::query_as("SELECT * FROM bag_types WHERE is_active = TRUE ORDER BY price")
                .fetch_all(self.pool)
                .await?;

        let mut templates = Vec::with_capacity(rows.len());
        for row in rows {
            let fixed = self.child_ids("bag_fixed_items", row.id).await?;
            let customizable = self.child_ids("bag_customizable_items", row.id).await?;
            templates.push(row.into_template(fixed, customizable)?);
        }
        Ok(templates)
    }

    /// Get a bag template by id, active or not, children resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: BagTypeId) -> Result<Option<BagTemplate>, RepositoryError> {
        let row: Option<BagTypeRow> = sqlx::query_as("SELECT * FROM bag_types WHERE id = $1")
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => {
                let fixed = self.child_ids("bag_fixed_items", row.id).await?;
                let customizable = self.child_ids("bag_customizable_items", row.id).await?;
                Ok(Some(row.into_template(fixed, customizable)?))
            }
            None => Ok(None),
        }
    }

    /// Create a bag template and its association rows in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; nothing
    /// is persisted in that case.
    pub async fn create(&self, bag: &NewBagType) -> Result<BagTemplate, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: BagTypeRow = sqlx::query_as(
            r"
            INSERT INTO bag_types (name, category, price, items_limit, description, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(&bag.name)
        .bind(bag.category.as_str())
        .bind(bag.price)
        .bind(bag.items_limit)
        .bind(&bag.description)
        .bind(bag.is_active)
        .fetch_one(&mut *tx)
        .await?;

        let id = row.id;
        insert_children(&mut tx, "bag_fixed_items", id, &bag.fixed_items).await?;
        insert_children(&mut tx, "bag_customizable_items", id, &bag.customizable_items).await?;

        tx.commit().await?;

        row.into_template(bag.fixed_items.clone(), bag.customizable_items.clone())
    }

    /// Replace a bag template's fields and association rows.
    ///
    /// Children are replaced, not merged: existing rows are deleted and
    /// the new lists inserted. Sending empty lists therefore removes all
    /// associations, and re-applying the same update is idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the id; the
    /// transaction is rolled back and no children are touched.
    pub async fn update(
        &self,
        id: BagTypeId,
        bag: &NewBagType,
    ) -> Result<BagTemplate, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<BagTypeRow> = sqlx::query_as(
            r"
            UPDATE bag_types
            SET name = $2, category = $3, price = $4, items_limit = $5,
                description = $6, is_active = $7
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(&bag.name)
        .bind(bag.category.as_str())
        .bind(bag.price)
        .bind(bag.items_limit)
        .bind(&bag.description)
        .bind(bag.is_active)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Err(RepositoryError::NotFound);
        };

        sqlx::query("DELETE FROM bag_fixed_items WHERE bag_type_id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM bag_customizable_items WHERE bag_type_id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        insert_children(&mut tx, "bag_fixed_items", id.as_i32(), &bag.fixed_items).await?;
        insert_children(
            &mut tx,
            "bag_customizable_items",
            id.as_i32(),
            &bag.customizable_items,
        )
        .await?;

        tx.commit().await?;

        row.into_template(bag.fixed_items.clone(), bag.customizable_items.clone())
    }

    /// Delete a bag template; association rows cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has the id.
    pub async fn delete(&self, id: BagTypeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM bag_types WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn child_ids(
        &self,
        table: &'static str,
        bag_type_id: i32,
    ) -> Result<Vec<ProductId>, RepositoryError> {
        let ids: Vec<i32> = sqlx::query_scalar(&format!(
            "SELECT product_id FROM {table} WHERE bag_type_id = $1 ORDER BY product_id"
        ))
        .bind(bag_type_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids.into_iter().map(ProductId::new).collect())
    }
}

/// Bulk-insert association rows for one child table.
async fn insert_children(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
    bag_type_id: i32,
    product_ids: &[ProductId],
) -> Result<(), RepositoryError> {
    for product_id in product_ids {
        sqlx::query(&format!(
            "INSERT INTO {table} (bag_type_id, product_id) VALUES ($1, $2)"
        ))
        .bind(bag_type_id)
        .bind(product_id.as_i32())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
