//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, resolves it, and injects a request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use backoffice_core::error::AppError;
use backoffice_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extract the raw token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let identity = state.identity.resolve(token).await?;
        Ok(AuthUser(RequestContext::new(identity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use backoffice_core::error::ErrorKind;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/customers");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc.def"))).unwrap(), "abc.def");
    }

    #[test]
    fn test_missing_or_malformed_header_rejected() {
        for header in [None, Some("Basic Zm9v"), Some("Bearer ")] {
            let err = bearer_token(&parts(header)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }
    }
}
