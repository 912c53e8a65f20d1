use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::state::AppState;

/// Caller identity established by `require_token`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Token guard: rejects the request with 401 unless the `Authorization`
/// header carries a valid, unexpired token. Runs before any handler work.
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())?;
    let user_id = state.tokens.verify(token)?;

    tracing::debug!("Authorized user {} for {}", user_id, request.uri().path());
    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

/// Raw token from the `Authorization` header. A `Bearer ` prefix is optional.
fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::Missing)?;
    let value = header
        .to_str()
        .map_err(|_| AuthError::Invalid("Authorization header is not valid ASCII".to_string()))?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Err(AuthError::Missing);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn accepts_raw_and_bearer_tokens() {
        assert_eq!(extract_token(&headers("abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(extract_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_or_blank_headers_are_missing() {
        assert!(matches!(extract_token(&HeaderMap::new()), Err(AuthError::Missing)));
        assert!(matches!(extract_token(&headers("Bearer ")), Err(AuthError::Missing)));
    }
}
