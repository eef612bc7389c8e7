//! Contact form routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use tazabag_core::ContactMessageId;

use crate::db::contact::{ContactRepository, NewContactMessage};
use crate::error::{AppError, Result};
use crate::models::ContactMessage;
use crate::state::AppState;
use crate::validate::{FieldError, Validate, Validator};

/// POST /contact body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl Validate for ContactBody {
    fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.require("firstName", &self.first_name)
            .require("lastName", &self.last_name)
            .email("email", &self.email)
            .require("subject", &self.subject)
            .require("message", &self.message);
        v.finish()
    }
}

/// POST /contact
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ContactBody>,
) -> Result<(StatusCode, Json<ContactMessage>)> {
    body.validate().map_err(AppError::Validation)?;

    let message = ContactRepository::new(state.pool())
        .create(&NewContactMessage {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone: body.phone,
            subject: body.subject,
            message: body.message,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /contact
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContactMessage>>> {
    let messages = ContactRepository::new(state.pool()).list().await?;
    Ok(Json(messages))
}

/// PUT /contact/{id}/reply
pub async fn mark_replied(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContactMessage>> {
    let message = ContactRepository::new(state.pool())
        .mark_replied(ContactMessageId::new(id))
        .await?;
    Ok(Json(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_is_optional() {
        let body: ContactBody = serde_json::from_value(serde_json::json!({
            "firstName": "Bilal",
            "lastName": "Ahmed",
            "email": "bilal@example.com",
            "subject": "Delivery areas",
            "message": "Do you deliver to Gulberg?"
        }))
        .expect("deserializes");
        assert!(body.validate().is_ok());
        assert!(body.phone.is_none());
    }

    #[test]
    fn test_rejects_blank_subject() {
        let body: ContactBody = serde_json::from_value(serde_json::json!({
            "firstName": "Bilal",
            "lastName": "Ahmed",
            "email": "bilal@example.com",
            "subject": "",
            "message": "hello"
        }))
        .expect("deserializes");
        let errors = body.validate().expect_err("blank subject");
        assert_eq!(errors[0].field, "subject");
    }
}
