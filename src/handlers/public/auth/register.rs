// handlers/public/auth/register.rs - POST /register handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::auth::password::hash_password_async;
use crate::database::models::{User, UserDraft};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

const REGISTERED: &str = "Successfully registered.";
const ALREADY_EXISTS: &str = "User already exists. Please Log in.";
const STORAGE_FAULT: &str = "An error occurred. Please try again.";
const MISSING_FIELDS: &str = "Missing email, user_name or password";

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    email: Option<String>,
    user_name: Option<String>,
    password: Option<String>,
}

/// POST /register - create an account
///
/// Expected input:
/// ```json
/// { "email": "ada@example.com", "user_name": "ada", "password": "secret" }
/// ```
///
/// 201 on success, 409 when the email (or user name) is taken, 400 when a
/// field is missing and 500 on a storage fault.
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let missing = || ApiError::validation_error(MISSING_FIELDS);

    let Json(body) = payload.map_err(|_| missing())?;
    let request: RegisterRequest = serde_json::from_value(body).map_err(|_| missing())?;
    let (email, user_name, password) = match (request.email, request.user_name, request.password) {
        (Some(email), Some(user_name), Some(password))
            if !email.is_empty() && !user_name.is_empty() && !password.is_empty() =>
        {
            (email, user_name, password)
        }
        _ => return Err(missing()),
    };

    let repo = state.repo::<User>();
    match repo.find_by("email", email.as_str()).await {
        Ok(None) => {}
        Ok(Some(_)) => return Err(ApiError::conflict(ALREADY_EXISTS)),
        Err(e) => {
            error!("Registration lookup failed: {}", e);
            return Err(ApiError::internal_server_error(STORAGE_FAULT));
        }
    }

    let password_hash = hash_password_async(password, state.config.security.bcrypt_cost)
        .await
        .map_err(|e| {
            error!("Password hashing failed: {}", e);
            ApiError::internal_server_error(STORAGE_FAULT)
        })?;

    let draft = UserDraft {
        user_id: None,
        email,
        password_hash,
        user_name,
    };
    match repo.insert(&draft).await {
        Ok(user) => {
            info!("{} registered at {}", user.email, chrono::Utc::now());
            Ok(ApiResponse::created(serde_json::json!({ "message": REGISTERED })))
        }
        Err(e) if e.is_unique_violation() => {
            warn!("Registration for {} hit a unique constraint: {}", draft.email, e);
            Err(ApiError::conflict(ALREADY_EXISTS))
        }
        Err(e) => {
            error!("Registration insert failed: {}", e);
            Err(ApiError::internal_server_error(STORAGE_FAULT))
        }
    }
}
