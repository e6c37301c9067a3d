//! Admin auth route handlers.
//!
//! A single admin credential pair comes from configuration; successful login
//! stores an [`AdminSession`] in the cookie session.

use axum::{Json, extract::State, http::StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::{ADMIN_SESSION_KEY, AdminSession};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
#[instrument(skip_all, fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>> {
    let admin = &state.config.admin;
    let authorized = payload.email == admin.email
        && payload.password == admin.password.expose_secret();
    if !authorized {
        tracing::warn!("failed admin login attempt");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    session
        .insert(
            ADMIN_SESSION_KEY,
            AdminSession {
                email: payload.email.clone(),
            },
        )
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!("admin logged in");
    Ok(Json(json!({"email": payload.email})))
}

/// GET /api/auth/me
///
/// Always 200; the body reports whether a session exists so the builder
/// client can branch without special-casing a 401.
pub async fn me(session: Session) -> Json<Value> {
    let admin: Option<AdminSession> = session.get(ADMIN_SESSION_KEY).await.ok().flatten();

    match admin {
        Some(admin) => Json(json!({"authenticated": true, "email": admin.email})),
        None => Json(json!({"authenticated": false})),
    }
}

/// POST /api/auth/logout
pub async fn logout(session: Session) -> Result<StatusCode> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session flush failed: {e}")))?;
    Ok(StatusCode::NO_CONTENT)
}
