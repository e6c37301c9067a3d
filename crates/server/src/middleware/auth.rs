//! Authentication extractor for builder routes.
//!
//! Page mutations and exports require the admin to be logged in. The login
//! state lives in the session; handlers opt in with the [`RequireAdmin`]
//! extractor.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;

/// Session key holding the logged-in admin.
pub const ADMIN_SESSION_KEY: &str = "admin";

/// The admin identity stored in the session after login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub email: String,
}

/// Extractor that requires an authenticated admin session.
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.email)
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

/// Rejection when no admin is logged in.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Authentication required"})),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The session is placed in extensions by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection)?;

        let admin: AdminSession = session
            .get(ADMIN_SESSION_KEY)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection)?;

        Ok(Self(admin))
    }
}
