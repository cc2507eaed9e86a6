//! JWT token encoding, decoding, and identity resolution.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod resolver;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use resolver::JwtIdentityResolver;
