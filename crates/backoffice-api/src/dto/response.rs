//! Response DTOs.

use serde::Serialize;

use backoffice_auth::Claims;
use backoffice_entity::assignment::AssignmentView;
use backoffice_service::assignment::Toggled;

/// `{deleted: true}` after a row disappeared.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    /// Always `true`.
    pub deleted: bool,
}

impl DeletedResponse {
    /// The only value this response takes.
    pub fn new() -> Self {
        Self { deleted: true }
    }
}

impl Default for DeletedResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a bulk quantity update.
#[derive(Debug, Clone, Serialize)]
pub struct BulkUpdateResponse {
    /// Whether the batch was committed.
    pub success: bool,
    /// Number of rows updated.
    pub updated: usize,
}

/// A toggled row together with whether it absorbed another one.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse {
    /// The row carrying the quantity after the toggle.
    #[serde(flatten)]
    pub assignment: AssignmentView,
    /// Whether the toggled row was merged into an existing one.
    pub merged: bool,
}

impl From<Toggled> for ToggleResponse {
    fn from(toggled: Toggled) -> Self {
        Self {
            assignment: toggled.assignment,
            merged: toggled.outcome.merged,
        }
    }
}

/// Outcome of a permanent product delete.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDeletedResponse {
    /// Always `true`.
    pub deleted: bool,
    /// Assignments removed together with the product.
    pub removed_assignments: u64,
}

/// Token verification result.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    /// Whether the token is valid.
    pub valid: bool,
    /// Decoded claims of a valid token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Claims>,
}

/// Health check result.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `connected` or `unreachable`.
    pub database: String,
}
