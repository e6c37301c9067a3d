//! Page route handlers.
//!
//! Reads are public so the published site and the builder can both load
//! pages; creates, updates, deletes, and exports require a logged-in admin.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use jaki_core::{EXPORT_FILENAME, NewPage, Page, PageRepository, PageUpdate, export_page};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// GET /api/pages
pub async fn list_pages(State(state): State<AppState>) -> Result<Json<Vec<Page>>> {
    Ok(Json(state.pages.list().await?))
}

/// GET /api/pages/{id}
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Page>> {
    Ok(Json(state.pages.get(&id).await?))
}

/// POST /api/pages
#[instrument(skip_all, fields(name = %payload.name))]
pub async fn create_page(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<NewPage>,
) -> Result<(StatusCode, Json<Page>)> {
    let page = state.pages.create(payload).await?;
    tracing::info!(page_id = %page.id, "page created");
    Ok((StatusCode::CREATED, Json(page)))
}

/// PUT /api/pages/{id}
#[instrument(skip_all, fields(page_id = %id))]
pub async fn update_page(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Json(payload): Json<PageUpdate>,
) -> Result<Json<Page>> {
    Ok(Json(state.pages.update(&id, payload).await?))
}

/// DELETE /api/pages/{id}
#[instrument(skip_all, fields(page_id = %id))]
pub async fn delete_page(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.pages.delete(&id).await?;
    tracing::info!("page deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/pages/{id}/export
///
/// Renders the page to a standalone HTML document and serves it as a
/// file download.
#[instrument(skip_all, fields(page_id = %id))]
pub async fn export_page_download(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Response> {
    let page = state.pages.get(&id).await?;
    let html = export_page(&page.components);

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        html,
    )
        .into_response())
}
