//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthUser, bearer_token};
pub use json::ValidJson;
