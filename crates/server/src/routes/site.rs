//! Published site handler.
//!
//! Serves the home page as the same HTML document the exporter produces,
//! with product grids populated from the live catalog. Builder output and
//! the served site stay pixel-identical because both go through the shared
//! document renderer.

use axum::{extract::State, response::Html};
use tracing::instrument;

use jaki_core::{GridMarkup, Product, export, render_page};

use crate::error::Result;
use crate::state::AppState;

/// GET /
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let Some(page) = state.pages.home_page().await else {
        return Ok(Html(empty_site()));
    };

    // A catalog outage degrades the grid to its placeholder, not the page.
    let grid = match state.catalog.products().await {
        Ok(products) => Some(product_grid_html(&products)),
        Err(err) => {
            tracing::warn!(error = %err, "catalog unavailable, serving grid placeholder");
            None
        }
    };

    let rendered = render_page(&page.components);
    let html = match &grid {
        Some(markup) => export::document(&rendered, GridMarkup::Live(markup)),
        None => export::document(&rendered, GridMarkup::Placeholder),
    };
    Ok(Html(html))
}

/// Format a minor-unit price for display.
fn format_price(minor: i64) -> String {
    format!("${}.{:02}", minor / 100, minor.rem_euclid(100))
}

/// Build the live product grid markup injected into productGrid components.
fn product_grid_html(products: &[Product]) -> String {
    if products.is_empty() {
        return "<p>No products available yet.</p>".to_string();
    }

    let cards: String = products
        .iter()
        .map(|product| {
            let image = product
                .images
                .first()
                .map(|src| {
                    format!(
                        r#"<img src="{}" alt="{}" style="width: 100%; aspect-ratio: 1; object-fit: cover;">"#,
                        export::escape_attr(src),
                        export::escape_attr(&product.title)
                    )
                })
                .unwrap_or_default();

            let price = product
                .enabled_variants()
                .map(|variant| variant.price)
                .min()
                .map(format_price)
                .unwrap_or_default();

            format!(
                concat!(
                    r#"<div style="border: 1px solid #e5e5e5; border-radius: 8px; overflow: hidden;">"#,
                    "{image}",
                    r#"<div style="padding: 12px;">"#,
                    r#"<h3 style="margin: 0 0 4px; font-size: 16px;">{title}</h3>"#,
                    r#"<p style="margin: 0; font-weight: 600;">{price}</p>"#,
                    "</div></div>"
                ),
                image = image,
                title = export::escape_text(&product.title),
                price = price,
            )
        })
        .collect();

    format!(
        r#"<div style="display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 24px;">{cards}</div>"#
    )
}

/// Minimal document served before any page has been created.
fn empty_site() -> String {
    export::document(&render_page(&[]), GridMarkup::Placeholder)
}
