//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use billfold_core::{Email, UserId};

use crate::error::{AppError, Result};
use crate::models::{CurrentUser, session_keys};
use crate::services::auth;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}

/// Verify credentials and establish a session.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email =
        Email::parse(&body.email).map_err(|e| AppError::Validation(e.to_string()))?;
    if body.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let user = auth::login(state.pool(), &email, &body.password).await?;

    // Rotate the session id on privilege change before storing identity.
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    session
        .insert(
            session_keys::CURRENT_USER,
            CurrentUser {
                id: user.id,
                email: user.email.clone(),
            },
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        name: user.name,
    }))
}

/// Destroy the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
