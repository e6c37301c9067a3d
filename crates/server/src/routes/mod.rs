//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                           - Published site (home page HTML)
//! GET  /health                     - Health check
//!
//! # Auth
//! POST /api/auth/login             - Admin login
//! GET  /api/auth/me                - Current admin
//! POST /api/auth/logout            - Logout
//!
//! # Pages (mutations and export require auth)
//! GET    /api/pages                - List pages
//! GET    /api/pages/{id}           - Fetch one page
//! POST   /api/pages                - Create page
//! PUT    /api/pages/{id}           - Update page
//! DELETE /api/pages/{id}           - Delete page
//! GET    /api/pages/{id}/export    - Download page as standalone HTML
//!
//! # Cart
//! GET  /api/cart/{id}              - Fetch cart
//! POST /api/cart                   - Create cart
//! PUT  /api/cart/{id}              - Replace cart items
//!
//! # Catalog
//! GET  /api/products               - Product listing
//! GET  /api/products/{id}          - Product detail
//! GET  /api/printify/shops         - Connected Printify shops
//! ```

pub mod auth;
pub mod cart;
pub mod pages;
pub mod products;
pub mod site;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}

/// Create the page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list_pages).post(pages::create_page))
        .route(
            "/{id}",
            get(pages::get_page)
                .put(pages::update_page)
                .delete(pages::delete_page),
        )
        .route("/{id}/export", get(pages::export_page_download))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::create_cart))
        .route("/{id}", get(cart::get_cart).put(cart::update_cart))
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list_products))
        .route("/{id}", get(products::get_product))
}

/// Health check endpoint.
async fn health() -> StatusCode {
    StatusCode::OK
}

/// Assemble the full application router with session and trace layers.
pub fn create_router(state: AppState) -> Router {
    let session_layer = create_session_layer(&state.config);

    Router::new()
        .route("/", get(site::home))
        .route("/health", get(health))
        .nest("/api/auth", auth_routes())
        .nest("/api/pages", page_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/products", product_routes())
        .route("/api/printify/shops", get(products::list_shops))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
