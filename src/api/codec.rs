//! JSON body decoding for entity drafts and partial updates.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::database::models::Patchable;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid body: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("body id {body} does not match path id {path}")]
    IdMismatch { path: i64, body: i64 },
}

/// Decode a complete draft. Missing, mistyped, null or unknown fields are rejected.
pub fn decode<D: DeserializeOwned>(body: Value) -> Result<D, DecodeError> {
    Ok(serde_json::from_value(body)?)
}

/// Decode a partial update for the record at `id`
pub fn decode_patch<T>(id: i64, body: Value) -> Result<T::Patch, DecodeError>
where
    T: Patchable,
    T::Patch: DeserializeOwned,
{
    let patch: T::Patch = serde_json::from_value(body)?;
    match T::patch_id(&patch) {
        Some(body_id) if body_id != id => Err(DecodeError::IdMismatch { path: id, body: body_id }),
        _ => Ok(patch),
    }
}

/// Merge the fields present in `body` onto `record`
pub fn merge<T>(record: &mut T, body: Value) -> Result<(), DecodeError>
where
    T: Patchable,
    T::Patch: DeserializeOwned,
{
    let patch = decode_patch::<T>(record.id(), body)?;
    record.apply(patch);
    Ok(())
}
