//! Maps domain `AppError` to HTTP responses through the local [`ApiError`]
//! wrapper.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use backoffice_core::error::{AppError, ErrorKind};

/// Handler and extractor error: a domain error on its way to the client.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub AppError);

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Status code and machine-readable code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Database => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        ErrorKind::Export => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR"),
        ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

impl From<&AppError> for ApiErrorResponse {
    fn from(err: &AppError) -> Self {
        let (_, code) = status_for(err.kind);
        match err.kind {
            ErrorKind::Database => Self {
                error: code.to_string(),
                message: format!("Operation failed: {}", err.message),
                details: err
                    .source
                    .as_ref()
                    .map(|s| serde_json::Value::String(s.to_string())),
            },
            _ => Self {
                error: code.to_string(),
                message: err.message.clone(),
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, _) = status_for(err.kind);

        if status.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?err.source.as_ref().map(|s| s.to_string()),
                "Request failed"
            );
        }

        (status, Json(ApiErrorResponse::from(&err))).into_response()
    }
}
