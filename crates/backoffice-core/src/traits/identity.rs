//! Bearer credential resolution.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::UserId;

/// The authenticated principal behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account ID.
    pub user_id: UserId,
    /// Login email.
    pub email: String,
}

/// Resolves a bearer credential into an [`Identity`] or rejects it.
///
/// The HTTP layer only depends on this trait, so the token format can be
/// swapped without touching handlers.
#[async_trait]
pub trait IdentityResolver: Send + Sync + 'static {
    /// Resolve the raw token (without the `Bearer ` prefix).
    async fn resolve(&self, token: &str) -> AppResult<Identity>;
}
