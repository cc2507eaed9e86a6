//! # backoffice-api
//!
//! HTTP API layer for the back-office service built on Axum.
//!
//! Provides the REST endpoints for customers, the product catalog, the
//! assignment engine, billing, and the Excel export, together with the
//! middleware stack, extractors, DTOs, and the `AppError` to HTTP mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
