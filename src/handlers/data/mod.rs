// handlers/data/mod.rs - Entity CRUD handlers
//
// Generic list/create/get/delete/update handlers, instantiated once per entity
// in `routes.rs`. Users have their own create/update because passwords are
// hashed before they reach the store.

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;

use crate::database::models::Entity;
use crate::database::Repository;
use crate::error::ApiError;

pub mod collection;
pub mod record;
pub mod users;

/// "The <Entity> details failed validation."
pub(crate) fn validation_message<T: Entity>() -> String {
    format!("The {} details failed validation.", T::LABEL)
}

/// Unwrap a JSON body, mapping a missing or malformed body to `on_error`
pub(crate) fn json_body(
    payload: Result<Json<Value>, JsonRejection>,
    on_error: impl FnOnce() -> ApiError,
) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            Err(on_error())
        }
    }
}

/// Load the record at `raw_id` for delete/update. Absent rows, non-integer ids
/// and storage faults all report `<Entity> <id> not found.`
pub(crate) async fn lookup<T: Entity>(repo: &Repository<T>, raw_id: &str) -> Result<T, ApiError> {
    let missing = || ApiError::lookup_failed(format!("{} {} not found.", T::LABEL, raw_id));

    let id = parse_id(raw_id).ok_or_else(missing)?;
    match repo.get(id).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(missing()),
        Err(e) => {
            tracing::error!("Lookup of {} {} failed: {}", T::LABEL, id, e);
            Err(missing())
        }
    }
}

pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::AgeGroup;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("4.2"), None);
    }

    #[test]
    fn validation_message_uses_entity_label() {
        assert_eq!(
            validation_message::<AgeGroup>(),
            "The Age_group details failed validation."
        );
    }
}
