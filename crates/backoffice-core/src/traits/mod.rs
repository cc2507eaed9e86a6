//! Core traits defined in `backoffice-core` and implemented by other crates.

pub mod identity;

pub use identity::{Identity, IdentityResolver};
