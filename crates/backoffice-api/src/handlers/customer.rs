//! Customer handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use backoffice_core::types::CustomerId;
use backoffice_entity::customer::Customer;

use crate::dto::request::CustomerRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// GET /api/customers
pub async fn list_customers(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.customer_service.list_active().await?))
}

/// GET /api/customers/archived/list
pub async fn list_archived(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.customer_service.list_archived().await?))
}

/// GET /api/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.customer_service.get(id).await?))
}

/// POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = state.customer_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /api/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CustomerId>,
    ValidJson(req): ValidJson<CustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.customer_service.update(&auth, id, req.into()).await?))
}

/// DELETE /api/customers/{id}
pub async fn archive_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.customer_service.archive(&auth, id).await?))
}

/// PUT /api/customers/{id}/restore
pub async fn restore_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.customer_service.restore(&auth, id).await?))
}
