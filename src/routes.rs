use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::database::models::{
    AgeGroup, CourseLevel, Disability, Employment, Entity, Ethnicity, Feedback, Gender, Teacher,
    User,
};
use crate::handlers::data::{collection, record, users};
use crate::handlers::public;
use crate::middleware::require_token;
use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/register", post(public::register_post))
        .route("/login", post(public::login_post))
        // Entities
        .merge(user_routes())
        .merge(entity_routes::<Feedback>())
        .merge(entity_routes::<AgeGroup>())
        .merge(entity_routes::<Gender>())
        .merge(entity_routes::<Ethnicity>())
        .merge(entity_routes::<Employment>())
        .merge(entity_routes::<CourseLevel>())
        .merge(entity_routes::<Disability>())
        .merge(teacher_routes(&state))
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn collection_path<T: Entity>() -> String {
    format!("/{}", T::COLLECTION)
}

fn record_path<T: Entity>() -> String {
    format!("/{}/:id", T::COLLECTION)
}

/// List, create, get and delete for an entity without updates
fn entity_routes<T>() -> Router<AppState>
where
    T: Entity,
    T::Draft: DeserializeOwned,
{
    Router::new()
        .route(
            &collection_path::<T>(),
            get(collection::list::<T>).post(collection::create::<T>),
        )
        .route(
            &record_path::<T>(),
            get(record::get::<T>).delete(record::delete::<T>),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            &collection_path::<User>(),
            get(collection::list::<User>).post(users::create),
        )
        .route(
            &record_path::<User>(),
            get(record::get::<User>)
                .delete(record::delete::<User>)
                .patch(users::update),
        )
}

/// Teacher updates are the only token-guarded route
fn teacher_routes(state: &AppState) -> Router<AppState> {
    let guarded_update =
        record::update::<Teacher>.layer(from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route(
            &collection_path::<Teacher>(),
            get(collection::list::<Teacher>).post(collection::create::<Teacher>),
        )
        .route(
            &record_path::<Teacher>(),
            get(record::get::<Teacher>)
                .delete(record::delete::<Teacher>)
                .patch(guarded_update),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
