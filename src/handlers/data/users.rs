// handlers/data/users.rs - POST /Users and PATCH /Users/:id
//
// Same contract as the generic handlers, except the plaintext `password`
// field is hashed before anything is written.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::api::{decode, decode_patch};
use crate::auth::password::hash_password_async;
use crate::database::models::{Entity, Patchable, User, UserInput};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::{json_body, lookup, validation_message};

/// POST /Users
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let failed = || ApiError::validation_error(validation_message::<User>());

    let body = json_body(payload, failed)?;
    let mut input: UserInput = decode(body).map_err(|e| {
        warn!("User validation failed: {}", e);
        failed()
    })?;
    if input.has_blank_field() {
        warn!("User validation failed: empty field");
        return Err(failed());
    }

    let password = std::mem::take(&mut input.password);
    let hash = hash_password(&state, password).await?;
    let draft = input.into_draft(hash);

    let repo = state.repo::<User>();
    if let Some(reason) = repo.constraint_violation(&draft).await? {
        warn!("User validation failed: {}", reason);
        return Err(failed());
    }

    let user = repo.insert(&draft).await?;

    info!("User added with id {}", user.user_id);
    Ok(ApiResponse::message(format!("User added with id= {}", user.user_id)))
}

/// PATCH /Users/:id
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let repo = state.repo::<User>();
    let mut user = lookup(&repo, &raw_id).await?;
    let id = user.id();

    let failed = || ApiError::internal_server_error(validation_message::<User>());
    let body = json_body(payload, failed)?;
    let mut patch = decode_patch::<User>(id, body).map_err(|e| {
        warn!("User {} update rejected: {}", id, e);
        failed()
    })?;

    if let Some(password) = patch.password.take() {
        patch.password_hash = Some(hash_password(&state, password).await?);
    }
    user.apply(patch);

    repo.update(&user).await?;

    info!("User {} updated", id);
    Ok(ApiResponse::message(format!("User {} updated.", id)))
}

async fn hash_password(state: &AppState, password: String) -> Result<String, ApiError> {
    hash_password_async(password, state.config.security.bcrypt_cost)
        .await
        .map_err(|e| {
            error!("Password hashing failed: {}", e);
            ApiError::internal()
        })
}
