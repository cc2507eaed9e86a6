//! Customer-product assignment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use backoffice_core::types::{AssignmentId, CustomerId};
use backoffice_entity::assignment::{AssignmentSummary, AssignmentView};
use backoffice_service::assignment::Decreased;

use crate::dto::request::{
    AttachRequest, BulkUpdateRequest, CustomProductRequest, SetQuantityRequest,
};
use crate::dto::response::{BulkUpdateResponse, DeletedResponse, ToggleResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/customer-products
///
/// 201 when a new unbilled row was created, 200 when an existing one grew.
pub async fn attach(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<AttachRequest>,
) -> Result<(StatusCode, Json<AssignmentView>), ApiError> {
    let attached = state
        .assignment_service
        .attach(&auth, req.customer_id, req.product_id, req.quantity)
        .await?;

    let status = if attached.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(attached.assignment)))
}

/// POST /api/customer-products/custom
pub async fn attach_custom(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CustomProductRequest>,
) -> Result<(StatusCode, Json<AssignmentView>), ApiError> {
    let view = state
        .assignment_service
        .attach_custom(&auth, req.customer_id, &req.name, req.price)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/customer-products/customer/{id}
pub async fn list_for_customer(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(customer_id): Path<CustomerId>,
) -> Result<Json<Vec<AssignmentView>>, ApiError> {
    Ok(Json(
        state
            .assignment_service
            .list_for_customer(customer_id)
            .await?,
    ))
}

/// GET /api/customer-products/customer/{id}/summary
pub async fn summary(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(customer_id): Path<CustomerId>,
) -> Result<Json<AssignmentSummary>, ApiError> {
    Ok(Json(state.assignment_service.summary(customer_id).await?))
}

/// PUT /api/customer-products/{id}/increase
pub async fn increase(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AssignmentId>,
) -> Result<Json<AssignmentView>, ApiError> {
    Ok(Json(state.assignment_service.increase(&auth, id).await?))
}

/// PUT /api/customer-products/{id}/decrease
pub async fn decrease(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AssignmentId>,
) -> Result<Response, ApiError> {
    let response = match state.assignment_service.decrease(&auth, id).await? {
        Decreased::Updated(view) => Json(view).into_response(),
        Decreased::Deleted => Json(DeletedResponse::new()).into_response(),
    };
    Ok(response)
}

/// PUT /api/customer-products/{id}
pub async fn set_quantity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AssignmentId>,
    ValidJson(req): ValidJson<SetQuantityRequest>,
) -> Result<Json<AssignmentView>, ApiError> {
    let quantity = req.quantity()?;
    Ok(Json(
        state
            .assignment_service
            .set_quantity(&auth, id, quantity)
            .await?,
    ))
}

/// PUT /api/customer-products/bulk-update
pub async fn bulk_update(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<BulkUpdateRequest>,
) -> Result<Json<BulkUpdateResponse>, ApiError> {
    let updates = req.updates()?;
    let updated = state
        .assignment_service
        .bulk_set_quantities(&auth, &updates)
        .await?;
    Ok(Json(BulkUpdateResponse {
        success: true,
        updated,
    }))
}

/// PUT /api/customer-products/{id}/toggle-billed
pub async fn toggle_billed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AssignmentId>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let toggled = state.assignment_service.toggle_billed(&auth, id).await?;
    Ok(Json(toggled.into()))
}

/// DELETE /api/customer-products/{id}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AssignmentId>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.assignment_service.remove(&auth, id).await?;
    Ok(Json(DeletedResponse::new()))
}
