//! # backoffice-entity
//!
//! Domain entity models for the back-office service. Every struct in this
//! crate represents a database table row or a domain value object. Row
//! types additionally derive `sqlx::FromRow`.

pub mod assignment;
pub mod category;
pub mod customer;
pub mod product;
pub mod user;
