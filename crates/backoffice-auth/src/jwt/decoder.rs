//! Access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use backoffice_core::config::AuthConfig;
use backoffice_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Check signature and expiry, returning the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use backoffice_core::error::ErrorKind;
    use backoffice_core::types::UserId;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issued_token_decodes() {
        let cfg = config("unit-test-secret");
        let (token, exp) = JwtEncoder::new(&cfg)
            .issue(UserId(3), "admin@example.com")
            .unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&token).unwrap();
        assert_eq!(claims.sub, UserId(3));
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.exp, exp.timestamp());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) = JwtEncoder::new(&config("one"))
            .issue(UserId(3), "admin@example.com")
            .unwrap();

        let err = JwtDecoder::new(&config("two")).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = JwtDecoder::new(&config("one"))
            .decode("not-a-token")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let cfg = config("short");
        let claims = Claims {
            sub: UserId(1),
            email: "a@b.c".into(),
            iat: 0,
            exp: 60,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"short"),
        )
        .unwrap();

        let err = JwtDecoder::new(&cfg).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(err.message.contains("expired"));
    }
}
