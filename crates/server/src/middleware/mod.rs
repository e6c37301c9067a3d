//! HTTP middleware: session layer and the admin auth extractor.

pub mod auth;
pub mod session;

pub use auth::{AdminSession, RequireAdmin};
pub use session::create_session_layer;
