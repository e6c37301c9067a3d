//! Cart store: create/get/update with server-confirmed totals.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use jaki_core::{Cart, CartItem, StoreError};

/// Snapshot filename under the data directory.
pub const CARTS_FILE: &str = "carts.json";

/// In-memory cart store with optional JSON snapshot persistence.
///
/// Totals are always recomputed from the items on write; whatever total a
/// client claims is discarded.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

struct Inner {
    carts: RwLock<Vec<Cart>>,
    path: Option<PathBuf>,
}

impl CartStore {
    /// Create an ephemeral store with no snapshot file.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                carts: RwLock::new(Vec::new()),
                path: None,
            }),
        }
    }

    /// Open the store backed by `<data_dir>/carts.json`.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot exists but cannot be read or
    /// parsed.
    pub async fn open(data_dir: &std::path::Path) -> Result<Self, StoreError> {
        let path = data_dir.join(CARTS_FILE);
        let carts: Vec<Cart> = super::load_snapshot(&path).await?.unwrap_or_default();
        tracing::info!(count = carts.len(), path = %path.display(), "cart store loaded");
        Ok(Self {
            inner: Arc::new(Inner {
                carts: RwLock::new(carts),
                path: Some(path),
            }),
        })
    }

    /// Fetch a cart by id.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn get(&self, id: &str) -> Result<Cart, StoreError> {
        self.inner
            .carts
            .read()
            .await
            .iter()
            .find(|c| c.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("cart {id}")))
    }

    /// Create a cart from an item list, assigning an id and recomputing the
    /// total.
    ///
    /// # Errors
    ///
    /// `Validation` for items with a non-positive quantity, a negative price,
    /// or an overflowing total. Propagates snapshot write failures.
    pub async fn create(&self, items: Vec<CartItem>) -> Result<Cart, StoreError> {
        let cart = Cart::from_items(Uuid::new_v4().to_string(), items)?;
        self.inner.carts.write().await.push(cart.clone());
        self.persist().await?;
        Ok(cart)
    }

    /// Replace a cart's items wholesale, recomputing the total.
    ///
    /// Leaves the stored cart untouched when the new items fail validation.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `Validation` for invalid items.
    pub async fn update(&self, id: &str, items: Vec<CartItem>) -> Result<Cart, StoreError> {
        let replacement = Cart::from_items(id.to_string(), items)?;
        let updated = {
            let mut carts = self.inner.carts.write().await;
            let slot = carts
                .iter_mut()
                .find(|c| c.id() == id)
                .ok_or_else(|| StoreError::NotFound(format!("cart {id}")))?;
            *slot = replacement;
            slot.clone()
        };
        self.persist().await?;
        Ok(updated)
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.inner.path else {
            return Ok(());
        };
        let snapshot = self.inner.carts.read().await.clone();
        super::write_snapshot(path, &snapshot).await
    }
}
