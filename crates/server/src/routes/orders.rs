//! Order submission and admin order routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use tazabag_core::{
    BagTypeId, Email, OrderId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, SubmittedItem,
    cart::verify_submission,
};

use crate::cache::CacheTag;
use crate::db::bag_types::BagTypeRepository;
use crate::db::orders::{NewCustomer, NewOrder, NewOrderItem, OrderRepository};
use crate::error::{AppError, Result};
use crate::models::{Order, OrderDetails};
use crate::state::AppState;
use crate::validate::{FieldError, Validate, Validator};

/// Customer block of an order submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBody {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

/// One frozen cart line in an order submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemBody {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// POST /orders body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub customer: CustomerBody,
    pub bag_type_id: i32,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
    pub items: Vec<OrderItemBody>,
}

impl Validate for CreateOrderBody {
    fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.require("customer.firstName", &self.customer.first_name)
            .require("customer.lastName", &self.customer.last_name)
            .email("customer.email", &self.customer.email)
            .min_len("customer.phone", &self.customer.phone, 11)
            .min_len("customer.address", &self.customer.address, 10)
            .require("customer.city", &self.customer.city)
            .positive_int("bagTypeId", self.bag_type_id)
            .positive("totalAmount", self.total_amount);
        let mut errors = match v.finish() {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };

        if self.items.is_empty() {
            errors.push(FieldError::new("items", "items must not be empty"));
        }
        for item in &self.items {
            if item.quantity <= 0 {
                errors.push(FieldError::new(
                    "items.quantity",
                    format!("quantity for product {} must be positive", item.product_id),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// PUT /orders/{id}/status body.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusBody {
    pub status: OrderStatus,
}

/// PUT /orders/{id}/payment body.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusBody {
    pub status: PaymentStatus,
}

/// POST /orders
///
/// Verifies the submitted items against the bag template's composition
/// rules before writing anything, then creates the customer (or reuses
/// the one matching the email), the order, and its items in one
/// transaction.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderBody>,
) -> Result<(StatusCode, Json<Order>)> {
    body.validate().map_err(AppError::Validation)?;

    let bag_type_id = BagTypeId::new(body.bag_type_id);
    let template = BagTypeRepository::new(state.pool())
        .get(bag_type_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Bag type with id {bag_type_id} not found")))?;

    let submitted: Vec<SubmittedItem> = body
        .items
        .iter()
        .map(|item| {
            let quantity = u32::try_from(item.quantity).map_err(|_| {
                AppError::BadRequest(format!(
                    "quantity for product {} must be positive",
                    item.product_id
                ))
            })?;
            Ok(SubmittedItem {
                product_id: ProductId::new(item.product_id),
                quantity,
            })
        })
        .collect::<Result<_>>()?;
    verify_submission(&template, &submitted)?;

    let email = Email::parse(body.customer.email.trim())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let new_order = NewOrder {
        customer: NewCustomer {
            first_name: body.customer.first_name,
            last_name: body.customer.last_name,
            email,
            phone: body.customer.phone,
            address: body.customer.address,
            city: body.customer.city,
        },
        bag_type_id,
        total_amount: body.total_amount,
        payment_method: body.payment_method,
        special_instructions: body.special_instructions,
        items: body
            .items
            .iter()
            .map(|item| NewOrderItem {
                product_id: ProductId::new(item.product_id),
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect(),
    };

    let order = OrderRepository::new(state.pool()).create(&new_order).await?;

    state.cache().invalidate(CacheTag::Stats);

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderDetails>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<OrderDetails>> {
    let order = OrderRepository::new(state.pool())
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order with id {id} not found")))?;
    Ok(Json(order))
}

/// PUT /orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateOrderStatusBody>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_order_status(OrderId::new(id), body.status)
        .await?;
    Ok(Json(order))
}

/// PUT /orders/{id}/payment
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdatePaymentStatusBody>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_payment_status(OrderId::new(id), body.status)
        .await?;
    Ok(Json(order))
}
