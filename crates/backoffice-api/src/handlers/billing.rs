//! Billing snapshot handler.

use axum::Json;
use axum::extract::{Path, State};

use backoffice_core::types::CustomerId;
use backoffice_entity::assignment::BillingSnapshot;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/customers/{id}/billing
pub async fn get_billing(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<CustomerId>,
) -> Result<Json<BillingSnapshot>, ApiError> {
    Ok(Json(state.billing_service.snapshot(id).await?))
}
