//! Bearer token to identity resolution backed by JWT validation.

use async_trait::async_trait;

use backoffice_core::config::AuthConfig;
use backoffice_core::result::AppResult;
use backoffice_core::traits::{Identity, IdentityResolver};

use super::decoder::JwtDecoder;

/// [`IdentityResolver`] that trusts any token signed with the configured secret.
#[derive(Debug, Clone)]
pub struct JwtIdentityResolver {
    decoder: JwtDecoder,
}

impl JwtIdentityResolver {
    /// Build a resolver from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoder: JwtDecoder::new(config),
        }
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(&self, token: &str) -> AppResult<Identity> {
        let claims = self.decoder.decode(token)?;
        tracing::trace!(user_id = %claims.sub, "Resolved bearer token");
        Ok(claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use backoffice_core::types::UserId;

    #[tokio::test]
    async fn test_resolves_issued_token() {
        let config = AuthConfig {
            jwt_secret: "resolver-secret".into(),
            ..AuthConfig::default()
        };
        let (token, _) = JwtEncoder::new(&config).issue(UserId(8), "ops@example.com").unwrap();

        let identity = JwtIdentityResolver::new(&config).resolve(&token).await.unwrap();
        assert_eq!(identity.user_id, UserId(8));
        assert_eq!(identity.email, "ops@example.com");
    }

    #[tokio::test]
    async fn test_rejects_foreign_token() {
        let config = AuthConfig::default();
        let resolver = JwtIdentityResolver::new(&config);
        assert!(resolver.resolve("a.b.c").await.is_err());
    }
}
