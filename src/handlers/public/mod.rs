// handlers/public/mod.rs - Public handlers (no authentication required)

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::database::health_check;
use crate::error::ApiError;
use crate::state::AppState;

pub mod auth;

pub use auth::*;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "ITT Census API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Initial teacher training census statistics",
        "endpoints": {
            "auth": "/register, /login (public)",
            "users": "/Users[/:id]",
            "feedback": "/Feedbacks[/:id]",
            "statistics": "/Age_groups, /Genders, /Ethnicities, /Employments, /Course_levels, /Disabilities [/:id]",
            "teachers": "/Teachers[/:id] (PATCH requires a token)",
            "health": "/health",
        }
    }))
}

/// GET /health - database connectivity
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    health_check(&state.pool).await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable("Database unavailable")
    })?;

    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok"
    })))
}
