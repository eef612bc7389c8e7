//! Back-office user routes.

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use tazabag_core::UserId;

use crate::db::users::{NewUser, UserRepository};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::state::AppState;
use crate::validate::{FieldError, Validate, Validator};

/// POST /users body. The password arrives in clear and is hashed with
/// Argon2 before it reaches the repository.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

impl Validate for CreateUserBody {
    fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.min_len("username", &self.username, 3)
            .email("email", &self.email)
            .min_len("password", &self.password, 8);
        v.finish()
    }
}

/// POST /users
///
/// Returns 409 when the username is already taken.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<User>)> {
    body.validate().map_err(AppError::Validation)?;

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(body.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?
        .to_string();

    let user = UserRepository::new(state.pool())
        .create(&NewUser {
            username: body.username,
            email: body.email,
            password_hash,
            role: body.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<User>> {
    let user = UserRepository::new(state.pool())
        .get(UserId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;
    Ok(Json(user))
}

/// GET /users/username/{username}
pub async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>> {
    let credentials = UserRepository::new(state.pool())
        .get_credentials(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found")))?;
    Ok(Json(credentials.user))
}
