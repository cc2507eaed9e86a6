//! # backoffice-database
//!
//! PostgreSQL connection management, the migration runner, and concrete
//! repositories for customers, the catalog, and customer-product
//! assignments.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
