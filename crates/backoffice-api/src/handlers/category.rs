//! Category handlers, mounted under `/api/products/categories`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use backoffice_core::types::CategoryId;
use backoffice_entity::category::{Category, CategoryNode};

use crate::dto::request::{CreateCategoryRequest, SetParentRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// GET /api/products/categories
pub async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.category_service.list(false).await?))
}

/// GET /api/products/categories/archived/list
pub async fn list_archived(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.category_service.list(true).await?))
}

/// GET /api/products/categories/tree
pub async fn get_tree(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<CategoryNode>>, ApiError> {
    Ok(Json(state.category_service.tree().await?))
}

/// POST /api/products/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.category_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/products/categories/{id}/parent
pub async fn set_parent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CategoryId>,
    ValidJson(req): ValidJson<SetParentRequest>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(
        state
            .category_service
            .set_parent(&auth, id, req.parent_id)
            .await?,
    ))
}

/// DELETE /api/products/categories/{id}
pub async fn archive_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.category_service.archive(&auth, id).await?))
}

/// PUT /api/products/categories/{id}/restore
pub async fn restore_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.category_service.restore(&auth, id).await?))
}
