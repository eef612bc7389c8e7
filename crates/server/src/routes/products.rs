//! Product catalog routes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use tazabag_core::{Product, ProductCategory, ProductId};

use crate::cache::{CacheKey, CacheTag, CacheValue};
use crate::db::products::{NewProduct, ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::validate::{FieldError, Validate, Validator};

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<ProductCategory>,
    pub available: Option<bool>,
}

/// Create/update body for a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub name: String,
    pub category: ProductCategory,
    pub price: Decimal,
    pub unit: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub nutrition_info: Option<serde_json::Value>,
}

const fn default_true() -> bool {
    true
}

impl Validate for ProductBody {
    fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.require("name", &self.name)
            .require("unit", &self.unit)
            .positive("price", self.price);
        v.finish()
    }
}

impl ProductBody {
    fn into_new(self) -> NewProduct {
        NewProduct {
            name: self.name,
            category: self.category,
            price: self.price,
            unit: self.unit,
            image_url: self.image_url,
            description: self.description,
            is_available: self.is_available,
            nutrition_info: self.nutrition_info,
        }
    }
}

/// GET /products
///
/// Lists the catalog, optionally filtered by `category` and
/// `available=true`. Served from the response cache when warm.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    let available = query.available.unwrap_or(false);
    let key = CacheKey::Products {
        category: query.category,
        available,
    };

    if let Some(CacheValue::Products(products)) = state.cache().get(&key).await {
        return Ok(Json(products));
    }

    let products = ProductRepository::new(state.pool())
        .list(ProductFilter {
            category: query.category,
            available_only: available,
        })
        .await?;

    state
        .cache()
        .insert(key, CacheValue::Products(products.clone()))
        .await;

    Ok(Json(products))
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ProductBody>,
) -> Result<(StatusCode, Json<Product>)> {
    body.validate().map_err(AppError::Validation)?;

    let product = ProductRepository::new(state.pool())
        .create(&body.into_new())
        .await?;

    state.cache().invalidate(CacheTag::Products);
    state.cache().invalidate(CacheTag::Stats);

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProductBody>,
) -> Result<Json<Product>> {
    body.validate().map_err(AppError::Validation)?;

    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &body.into_new())
        .await?;

    state.cache().invalidate(CacheTag::Products);

    Ok(Json(product))
}

/// DELETE /products/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    state.cache().invalidate(CacheTag::Products);
    state.cache().invalidate(CacheTag::Stats);

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> ProductBody {
        ProductBody {
            name: "Anwar Ratol Mangoes".to_string(),
            category: ProductCategory::Fruit,
            price: Decimal::new(15000, 2),
            unit: "kg".to_string(),
            image_url: None,
            description: None,
            is_available: true,
            nutrition_info: None,
        }
    }

    #[test]
    fn test_valid_body() {
        assert!(body().validate().is_ok());
    }

    #[test]
    fn test_rejects_blank_name_and_zero_price() {
        let mut b = body();
        b.name = " ".to_string();
        b.price = Decimal::ZERO;
        let errors = b.validate().expect_err("two failures");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_is_available_defaults_to_true() {
        let b: ProductBody = serde_json::from_value(serde_json::json!({
            "name": "Desi Tomatoes",
            "category": "vegetable",
            "price": "80.00",
            "unit": "kg"
        }))
        .expect("deserializes");
        assert!(b.is_available);
    }
}
