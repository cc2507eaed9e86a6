//! # backoffice-service
//!
//! Business logic service layer. Each service orchestrates repositories
//! to implement one group of use cases; dependencies are handed over at
//! construction time as `Arc` references.

pub mod assignment;
pub mod auth;
pub mod billing;
pub mod catalog;
pub mod context;
pub mod customer;
pub mod export;

pub use assignment::AssignmentService;
pub use auth::AuthService;
pub use billing::BillingService;
pub use catalog::{CategoryService, ProductService};
pub use context::RequestContext;
pub use customer::CustomerService;
pub use export::ExportService;
