//! Login and account bootstrap.

pub mod service;

pub use service::{AuthService, LoginResult, LoginUser};
