// handlers/public/auth/login.rs - POST /login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::auth::password::verify_password_async;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

const MISSING_CREDENTIALS: &str = "Missing email or password";
// Shared by unknown email and wrong password so accounts cannot be enumerated
const BAD_CREDENTIALS: &str = "Incorrect email or password.";

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub token: String,
}

/// POST /login - exchange credentials for a token
///
/// Expected input:
/// ```json
/// { "email": "ada@example.com", "password": "secret" }
/// ```
///
/// Returns 201 with `{"user_id", "token"}`. Every failure is a 401.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let missing = || ApiError::unauthorized(MISSING_CREDENTIALS);
    let rejected = || ApiError::unauthorized(BAD_CREDENTIALS);

    let Json(body) = payload.map_err(|_| missing())?;
    let request: LoginRequest = serde_json::from_value(body).map_err(|_| missing())?;
    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(missing()),
    };

    let user = match state.repo::<User>().find_by("email", email.as_str()).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(rejected()),
        Err(e) => {
            error!("Login lookup failed: {}", e);
            return Err(rejected());
        }
    };

    let verified = verify_password_async(password, user.password_hash.clone())
        .await
        .map_err(|e| {
            error!("Password verification failed: {}", e);
            rejected()
        })?;
    if !verified {
        return Err(rejected());
    }

    let token = state.tokens.issue(user.user_id)?;
    info!("User {} logged in", user.user_id);
    Ok(ApiResponse::created(LoginResponse {
        user_id: user.user_id,
        token,
    }))
}
