//! Catalog product handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use backoffice_core::types::ProductId;
use backoffice_entity::product::{CatalogProduct, Product};

use crate::dto::request::{CreateProductRequest, UpdateProductRequest};
use crate::dto::response::ProductDeletedResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// GET /api/products
pub async fn list_catalog(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<CatalogProduct>>, ApiError> {
    Ok(Json(state.product_service.list_catalog().await?))
}

/// GET /api/products/all
pub async fn list_all(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<CatalogProduct>>, ApiError> {
    Ok(Json(state.product_service.list_all().await?))
}

/// GET /api/products/archived/list
pub async fn list_archived(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<CatalogProduct>>, ApiError> {
    Ok(Json(state.product_service.list_archived().await?))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ProductId>,
) -> Result<Json<CatalogProduct>, ApiError> {
    Ok(Json(state.product_service.get(id).await?))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<CatalogProduct>), ApiError> {
    let product = state
        .product_service
        .create(&auth, req.into_entity()?)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
    ValidJson(req): ValidJson<UpdateProductRequest>,
) -> Result<Json<CatalogProduct>, ApiError> {
    Ok(Json(
        state.product_service.update(&auth, id, req.into()).await?,
    ))
}

/// PUT /api/products/{id}/toggle-active
pub async fn toggle_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.product_service.toggle_active(&auth, id).await?))
}

/// DELETE /api/products/{id}
pub async fn archive_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.product_service.archive(&auth, id).await?))
}

/// PUT /api/products/{id}/restore
pub async fn restore_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.product_service.restore(&auth, id).await?))
}

/// DELETE /api/products/{id}/permanent
pub async fn delete_permanently(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDeletedResponse>, ApiError> {
    let removed = state.product_service.delete_permanently(&auth, id).await?;
    Ok(Json(ProductDeletedResponse {
        deleted: true,
        removed_assignments: removed,
    }))
}
