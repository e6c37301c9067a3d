//! Cart route handlers.
//!
//! The client sends its item list; totals are always recomputed server-side
//! from variant prices, so a tampered total never survives a round trip.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use jaki_core::{Cart, CartItem};

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CartPayload {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// GET /api/cart/{id}
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Cart>> {
    Ok(Json(state.carts.get(&id).await?))
}

/// POST /api/cart
#[instrument(skip_all)]
pub async fn create_cart(
    State(state): State<AppState>,
    Json(payload): Json<CartPayload>,
) -> Result<(StatusCode, Json<Cart>)> {
    let cart = state.carts.create(payload.items).await?;
    tracing::debug!(cart_id = %cart.id(), "cart created");
    Ok((StatusCode::CREATED, Json(cart)))
}

/// PUT /api/cart/{id}
#[instrument(skip_all, fields(cart_id = %id))]
pub async fn update_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CartPayload>,
) -> Result<Json<Cart>> {
    Ok(Json(state.carts.update(&id, payload.items).await?))
}
