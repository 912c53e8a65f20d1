pub mod auth;
pub mod response;

pub use auth::{require_token, AuthUser};
pub use response::{ApiResponse, ApiResult};
