//! Catalog route handlers backed by the Printify client.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use jaki_core::Product;

use crate::catalog::Shop;
use crate::error::Result;
use crate::state::AppState;

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog.products().await?))
}

/// GET /api/products/{id}
#[instrument(skip_all, fields(product_id = %id))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog.product(&id).await?))
}

/// GET /api/printify/shops
pub async fn list_shops(State(state): State<AppState>) -> Result<Json<Vec<Shop>>> {
    Ok(Json(state.catalog.shops().await?))
}
