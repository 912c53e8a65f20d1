pub mod password;

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{SecurityConfig, MAX_JWT_EXPIRY_HOURS};

/// Claims carried by every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued to, as a decimal string
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i64, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("authentication token missing")]
    Missing,
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies signed, time-bound tokens.
///
/// Holds no session state: `verify` re-derives everything from the token.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
    lifetime: Duration,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            lifetime,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        let hours = security.jwt_expiry_hours.min(MAX_JWT_EXPIRY_HOURS) as i64;
        Self::new(&security.jwt_secret, Duration::hours(hours))
    }

    /// Sign a token for `user_id` valid for the configured lifetime
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, self.lifetime);
        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded user id
    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid(e.to_string()),
            }
        })?;

        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::Invalid(format!("subject '{}' is not a user id", data.claims.sub)))
    }
}
