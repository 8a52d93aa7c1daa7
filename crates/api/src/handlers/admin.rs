//! Handlers for the admin session: login, logout, session check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clubsite_core::error::CoreError;
use clubsite_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Successful login: the bearer token for subsequent admin requests.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub expires_at: Timestamp,
}

/// Payload of `GET /admin/session`.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub valid: bool,
}

fn invalid_password() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid password".into()))
}

/// POST /api/admin/login
///
/// Exchange the admin password for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let Some(hash) = state.config.admin.password_hash.as_deref() else {
        tracing::warn!("Admin login attempted but no admin password is configured");
        return Err(invalid_password());
    };

    let valid = verify_password(&input.password, hash)
        .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::warn!("Admin login rejected: wrong password");
        return Err(invalid_password());
    }

    let session = state.sessions.issue().await;
    tracing::info!(expires_at = %session.expires_at, "Admin session issued");

    Ok(Json(LoginResponse {
        success: true,
        token: session.token,
        expires_at: session.expires_at,
    }))
}

/// POST /api/admin/logout
///
/// Revoke the presented session token. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, admin: AdminSession) -> StatusCode {
    state.sessions.revoke(&admin.token).await;
    tracing::info!("Admin session revoked");
    StatusCode::NO_CONTENT
}

/// GET /api/admin/session
///
/// Lets the admin panel check a stored token on page load. Invalid tokens
/// are rejected by the extractor with 401.
pub async fn session(_admin: AdminSession) -> Json<DataResponse<SessionStatus>> {
    Json(DataResponse::new(SessionStatus { valid: true }))
}
