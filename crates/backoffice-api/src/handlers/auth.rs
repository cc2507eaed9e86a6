//! Auth handlers: login and token verification.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};

use backoffice_service::auth::LoginResult;

use crate::dto::request::LoginRequest;
use crate::dto::response::VerifyResponse;
use crate::error::ApiError;
use crate::extractors::ValidJson;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<LoginResult>, ApiError> {
    let result = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(result))
}

/// GET /api/auth/verify
pub async fn verify(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let claims = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| state.jwt_decoder.decode(token.trim()).ok());

    match claims {
        Some(claims) => Json(VerifyResponse {
            valid: true,
            user: Some(claims),
        })
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(VerifyResponse {
                valid: false,
                user: None,
            }),
        )
            .into_response(),
    }
}
