//! Page store: CRUD over named pages with JSON snapshot persistence.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use jaki_core::{NewPage, Page, PageRepository, PageUpdate, StoreError};

/// Snapshot filename under the data directory.
pub const PAGES_FILE: &str = "pages.json";

/// In-memory page store with optional JSON snapshot persistence.
///
/// Pages keep their creation order, so "the first page" is stable across
/// restarts. Cheaply cloneable; clones share state.
#[derive(Clone)]
pub struct PageStore {
    inner: Arc<Inner>,
}

struct Inner {
    pages: RwLock<Vec<Page>>,
    /// `None` disables persistence (tests).
    path: Option<PathBuf>,
}

impl PageStore {
    /// Create an ephemeral store with no snapshot file.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                pages: RwLock::new(Vec::new()),
                path: None,
            }),
        }
    }

    /// Open the store backed by `<data_dir>/pages.json`, loading any
    /// existing snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot exists but cannot be read or
    /// parsed.
    pub async fn open(data_dir: &std::path::Path) -> Result<Self, StoreError> {
        let path = data_dir.join(PAGES_FILE);
        let pages: Vec<Page> = super::load_snapshot(&path).await?.unwrap_or_default();
        tracing::info!(count = pages.len(), path = %path.display(), "page store loaded");
        Ok(Self {
            inner: Arc::new(Inner {
                pages: RwLock::new(pages),
                path: Some(path),
            }),
        })
    }

    /// Number of stored pages.
    pub async fn len(&self) -> usize {
        self.inner.pages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.pages.read().await.is_empty()
    }

    /// The page the public site should show: the one named "home" or "site"
    /// (case-insensitive), else the first page.
    pub async fn home_page(&self) -> Option<Page> {
        let pages = self.inner.pages.read().await;
        pages
            .iter()
            .find(|p| {
                let name = p.name.to_lowercase();
                name == "home" || name == "site"
            })
            .or_else(|| pages.first())
            .cloned()
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.inner.path else {
            return Ok(());
        };
        let snapshot = self.inner.pages.read().await.clone();
        super::write_snapshot(path, &snapshot).await
    }
}

impl PageRepository for PageStore {
    async fn list(&self) -> Result<Vec<Page>, StoreError> {
        Ok(self.inner.pages.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Page, StoreError> {
        self.inner
            .pages
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("page {id}")))
    }

    async fn create(&self, new: NewPage) -> Result<Page, StoreError> {
        if new.name.trim().is_empty() {
            return Err(StoreError::Validation("page name must not be empty".to_string()));
        }
        let page = Page {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            components: new.components,
        };
        self.inner.pages.write().await.push(page.clone());
        self.persist().await?;
        Ok(page)
    }

    async fn update(&self, id: &str, update: PageUpdate) -> Result<Page, StoreError> {
        let updated = {
            let mut pages = self.inner.pages.write().await;
            let page = pages
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("page {id}")))?;
            // Whole-record replace of provided fields; the components array
            // is never merged element-wise here.
            if let Some(name) = update.name {
                page.name = name;
            }
            if let Some(components) = update.components {
                page.components = components;
            }
            page.clone()
        };
        self.persist().await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        {
            let mut pages = self.inner.pages.write().await;
            let index = pages
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("page {id}")))?;
            // At least one page must always exist; reject before removing.
            if pages.len() == 1 {
                return Err(StoreError::Validation(
                    "cannot delete the last remaining page".to_string(),
                ));
            }
            pages.remove(index);
        }
        self.persist().await
    }
}
