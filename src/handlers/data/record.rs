// handlers/data/record.rs - GET, DELETE and PATCH on /<Entities>/:id

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::merge;
use crate::database::models::{Entity, Patchable};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::{json_body, lookup, parse_id, validation_message};

/// GET /<Entities>/:id
pub async fn get<T: Entity>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<T> {
    let not_found = || ApiError::not_found(format!("{} not found", T::LABEL));

    let id = parse_id(&raw_id).ok_or_else(not_found)?;
    let record = state.repo::<T>().get(id).await?.ok_or_else(not_found)?;
    Ok(ApiResponse::success(record))
}

/// DELETE /<Entities>/:id - storage faults are reported as not found
pub async fn delete<T: Entity>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Value> {
    let missing = || ApiError::lookup_failed(format!("{} {} not found.", T::LABEL, raw_id));

    let id = parse_id(&raw_id).ok_or_else(missing)?;
    match state.repo::<T>().delete(id).await {
        Ok(()) => {
            info!("{} {} deleted", T::LABEL, id);
            Ok(ApiResponse::message(format!("{} deleted with id= {}", T::LABEL, id)))
        }
        Err(e) => {
            warn!("Deleting {} {} failed: {}", T::LABEL, id, e);
            Err(missing())
        }
    }
}

/// PATCH /<Entities>/:id - merge the supplied fields onto the stored record.
///
/// A body that fails to decode is answered with 500, not 400.
pub async fn update<T>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    caller: Option<Extension<AuthUser>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value>
where
    T: Patchable,
    T::Patch: DeserializeOwned,
{
    let repo = state.repo::<T>();
    let mut record = lookup(&repo, &raw_id).await?;
    let id = record.id();

    let failed = || ApiError::internal_server_error(validation_message::<T>());
    let body = json_body(payload, failed)?;
    merge(&mut record, body).map_err(|e| {
        warn!("{} {} update rejected: {}", T::LABEL, id, e);
        failed()
    })?;

    repo.update(&record).await?;

    match caller {
        Some(Extension(user)) => info!("{} {} updated by user {}", T::LABEL, id, user.user_id),
        None => info!("{} {} updated", T::LABEL, id),
    }
    Ok(ApiResponse::message(format!("{} {} updated.", T::LABEL, id)))
}
