//! Bag template routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use tazabag_core::{BagCategory, BagTemplate, BagTypeId, ProductId};

use crate::cache::{CacheKey, CacheTag, CacheValue};
use crate::db::bag_types::{BagTypeRepository, NewBagType};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::validate::{FieldError, Validate, Validator};

/// Create/update body for a bag template.
///
/// `fixedItems` / `customizableItems` are product id arrays; on update
/// they replace the existing associations wholesale.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagTypeBody {
    pub name: String,
    pub category: BagCategory,
    pub price: Decimal,
    pub items_limit: i32,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub fixed_items: Vec<i32>,
    #[serde(default)]
    pub customizable_items: Vec<i32>,
}

const fn default_true() -> bool {
    true
}

impl Validate for BagTypeBody {
    fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.require("name", &self.name)
            .positive("price", self.price)
            .positive_int("itemsLimit", self.items_limit);
        v.finish()
    }
}

impl BagTypeBody {
    fn into_new(self) -> NewBagType {
        NewBagType {
            name: self.name,
            category: self.category,
            price: self.price,
            items_limit: self.items_limit,
            description: self.description,
            is_active: self.is_active,
            fixed_items: self.fixed_items.into_iter().map(ProductId::new).collect(),
            customizable_items: self
                .customizable_items
                .into_iter()
                .map(ProductId::new)
                .collect(),
        }
    }
}

/// GET /bag-types
///
/// Lists active bag templates cheapest first, with their fixed and
/// customizable product id arrays. Served from the response cache when
/// warm.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BagTemplate>>> {
    if let Some(CacheValue::BagTypes(bags)) = state.cache().get(&CacheKey::BagTypes).await {
        return Ok(Json(bags));
    }

    let bags = BagTypeRepository::new(state.pool()).list_active().await?;

    state
        .cache()
        .insert(CacheKey::BagTypes, CacheValue::BagTypes(bags.clone()))
        .await;

    Ok(Json(bags))
}

/// POST /bag-types
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<BagTypeBody>,
) -> Result<(StatusCode, Json<BagTemplate>)> {
    body.validate().map_err(AppError::Validation)?;

    let bag = BagTypeRepository::new(state.pool())
        .create(&body.into_new())
        .await?;

    state.cache().invalidate(CacheTag::BagTypes);

    Ok((StatusCode::CREATED, Json(bag)))
}

/// PUT /bag-types/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<BagTypeBody>,
) -> Result<Json<BagTemplate>> {
    body.validate().map_err(AppError::Validation)?;

    let bag = BagTypeRepository::new(state.pool())
        .update(BagTypeId::new(id), &body.into_new())
        .await?;

    state.cache().invalidate(CacheTag::BagTypes);

    Ok(Json(bag))
}

/// DELETE /bag-types/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    BagTypeRepository::new(state.pool())
        .delete(BagTypeId::new(id))
        .await?;

    state.cache().invalidate(CacheTag::BagTypes);

    Ok(StatusCode::NO_CONTENT)
}
