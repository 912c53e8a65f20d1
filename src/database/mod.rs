pub mod manager;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;

pub use manager::{connect, health_check, DatabaseError};
pub use repository::Repository;
pub use schema::ensure_schema;
