//! Seed the page store with a starter home page.

use std::path::Path;

use tracing::info;

use jaki_core::{Component, ComponentType, NewPage, PageRepository};
use jaki_server::store::PageStore;

/// The components a fresh site starts with.
fn starter_components() -> Vec<Component> {
    let mut welcome = Component::new(ComponentType::Text, 1);
    welcome.content = "Welcome to Jaki Global. Edit this page in the builder.".to_string();

    vec![
        Component::new(ComponentType::Header, 0),
        welcome,
        Component::new(ComponentType::ProductGrid, 2),
    ]
}

/// Create a starter home page unless one already exists.
///
/// # Errors
///
/// Returns an error when the store cannot be read or written.
pub async fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = PageStore::open(data_dir).await?;

    if let Some(page) = store.home_page().await {
        info!(page_id = %page.id, "home page already exists, nothing to seed");
        return Ok(());
    }

    let page = store
        .create(NewPage {
            name: "Home".to_string(),
            components: starter_components(),
        })
        .await?;

    info!(page_id = %page.id, "seeded starter home page");
    Ok(())
}
