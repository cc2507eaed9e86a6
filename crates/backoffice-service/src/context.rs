//! Request context carrying the authenticated account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backoffice_core::traits::Identity;
use backoffice_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from the resolved bearer identity and passed
/// into every service method that changes state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account ID.
    pub user_id: UserId,
    /// The account email.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for the given identity, stamped with the current time.
    pub fn new(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id,
            email: identity.email,
            request_time: Utc::now(),
        }
    }

    /// Context for work started by the process itself (startup tasks, tests).
    pub fn system() -> Self {
        Self {
            user_id: UserId(0),
            email: "system".to_string(),
            request_time: Utc::now(),
        }
    }
}

impl From<Identity> for RequestContext {
    fn from(identity: Identity) -> Self {
        Self::new(identity)
    }
}
