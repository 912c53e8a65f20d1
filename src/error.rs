// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// Message returned for any fault the client cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "An Internal Server Error occurred.";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found, reported under the `error` key
    NotFound(String),

    // 404 Not Found for delete/update lookups, reported under the `message` key
    LookupFailed(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) | ApiError::LookupFailed(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::LookupFailed(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::NotFound(msg) => json!({ "error": msg }),
            _ => json!({ "message": self.message() }),
        }
    }
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn lookup_failed(message: impl Into<String>) -> Self {
        ApiError::LookupFailed(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// 500 with the generic message
    pub fn internal() -> Self {
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

/// Every storage fault surfaces as a 500 with the generic message.
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return generic message
        tracing::error!("Database error: {}", err);
        ApiError::internal()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Missing => ApiError::unauthorized("Authentication token missing"),
            AuthError::Expired => ApiError::unauthorized("Token expired. Please log in again."),
            AuthError::Invalid(reason) => {
                tracing::debug!("Rejected token: {}", reason);
                ApiError::unauthorized("Invalid token. Please log in again.")
            }
            AuthError::Signing(reason) => {
                tracing::error!("Token signing failed: {}", reason);
                ApiError::internal()
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_error_key() {
        let err = ApiError::not_found("Teacher not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_json(), json!({ "error": "Teacher not found" }));
    }

    #[test]
    fn lookup_failures_use_message_key() {
        let err = ApiError::lookup_failed("Teacher 9 not found.");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_json(), json!({ "message": "Teacher 9 not found." }));
    }

    #[test]
    fn auth_errors_map_to_401() {
        for err in [AuthError::Missing, AuthError::Expired, AuthError::Invalid("bad".into())] {
            assert_eq!(ApiError::from(err).status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn database_faults_hide_details() {
        for fault in [
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut),
            DatabaseError::NotFound("Teacher 9 vanished after insert".into()),
        ] {
            let err = ApiError::from(fault);
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.to_json(), json!({ "message": INTERNAL_ERROR_MESSAGE }));
        }
    }
}
