//! Route handlers organized by domain.

pub mod assignment;
pub mod auth;
pub mod billing;
pub mod category;
pub mod customer;
pub mod export;
pub mod health;
pub mod product;
