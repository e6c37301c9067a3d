//! Shared application state.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::store::{CartStore, PageStore};

/// Shared application state, cheap to clone across handlers.
pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub config: ServerConfig,
    pub pages: PageStore,
    pub carts: CartStore,
    pub catalog: CatalogClient,
}

/// Build the application state from configuration: opens the JSON page and
/// cart stores under the data directory and wires the catalog client.
///
/// # Errors
///
/// Returns an error when a store snapshot cannot be read.
pub async fn build_state(config: ServerConfig) -> Result<AppState> {
    let pages = PageStore::open(&config.data_dir).await?;
    let carts = CartStore::open(&config.data_dir).await?;
    let catalog = CatalogClient::new(config.printify_api_token.clone());

    Ok(Arc::new(AppStateInner {
        config,
        pages,
        carts,
        catalog,
    }))
}
