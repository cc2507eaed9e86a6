//! # backoffice-auth
//!
//! Credential handling for the back-office service.
//!
//! ## Modules
//!
//! - `jwt`: token issuance, validation, and the bearer identity resolver
//! - `password`: Argon2id password hashing

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, JwtIdentityResolver};
pub use password::PasswordHasher;
