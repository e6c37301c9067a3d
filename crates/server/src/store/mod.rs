//! JSON-file-backed stores for pages and carts.
//!
//! Records live in memory behind a `tokio::sync::RwLock` and are snapshotted
//! to `<data_dir>/pages.json` / `<data_dir>/carts.json` after every mutation,
//! then reloaded at startup. A single-admin deployment does not need more;
//! concurrent writers are last-writer-wins.

pub mod carts;
pub mod pages;

pub use carts::CartStore;
pub use pages::PageStore;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use jaki_core::StoreError;

/// Load a snapshot file, or `None` when it does not exist yet.
pub(crate) async fn load_snapshot<T: DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let value = serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Validation(format!("corrupt snapshot {}: {e}", path.display()))
            })?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Unavailable(format!(
            "read {}: {e}",
            path.display()
        ))),
    }
}

/// Write a snapshot file, creating the parent directory if needed.
pub(crate) async fn write_snapshot<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::Unavailable(format!("mkdir {}: {e}", parent.display())))?;
    }
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| StoreError::Unavailable(format!("serialize snapshot: {e}")))?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| StoreError::Unavailable(format!("write {}: {e}", path.display())))
}
