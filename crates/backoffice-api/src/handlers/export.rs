//! Excel export download.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;

use backoffice_core::types::CustomerId;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/customer-products/export/excel/{customer_id}
pub async fn export_excel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(customer_id): Path<CustomerId>,
) -> Result<impl IntoResponse, ApiError> {
    let file = state
        .export_service
        .export_customer(&auth, customer_id)
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    Ok((
        [
            (CONTENT_TYPE, file.content_type.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    ))
}
