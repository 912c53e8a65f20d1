// handlers/data/collection.rs - GET and POST on /<Entities>

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::decode;
use crate::database::models::Entity;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::{json_body, validation_message};

/// GET /<Entities> - every row, ordered by id
pub async fn list<T: Entity>(State(state): State<AppState>) -> ApiResult<Vec<T>> {
    let rows = state.repo::<T>().list().await?;
    Ok(ApiResponse::success(rows))
}

/// POST /<Entities> - decode, check constraints, insert
pub async fn create<T>(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value>
where
    T: Entity,
    T::Draft: DeserializeOwned,
{
    let failed = || ApiError::validation_error(validation_message::<T>());

    let body = json_body(payload, failed)?;
    let draft: T::Draft = decode(body).map_err(|e| {
        warn!("{} validation failed: {}", T::LABEL, e);
        failed()
    })?;

    let repo = state.repo::<T>();
    if let Some(reason) = repo.constraint_violation(&draft).await? {
        warn!("{} validation failed: {}", T::LABEL, reason);
        return Err(failed());
    }

    let stored = repo.insert(&draft).await?;

    info!("{} added with id {}", T::LABEL, stored.id());
    Ok(ApiResponse::message(format!("{} added with id= {}", T::LABEL, stored.id())))
}
