//! Page records and the repository contract.
//!
//! A page owns its component list exclusively; every save replaces the whole
//! array (no element-level diffing). The repository is implemented by the
//! server's JSON-backed store and by test doubles.

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::error::StoreError;

/// A named, ordered collection of components; the unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Payload for creating a page; the store assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPage {
    pub name: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Partial update; provided fields replace wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
}

/// CRUD over named pages.
///
/// All operations are whole-record replace; merging component arrays is the
/// edit session's responsibility. Implementations return
/// [`StoreError::NotFound`] for unknown ids and must not partially apply an
/// update.
pub trait PageRepository: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<Page>, StoreError>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Page, StoreError>> + Send;

    fn create(&self, page: NewPage) -> impl Future<Output = Result<Page, StoreError>> + Send;

    fn update(
        &self,
        id: &str,
        update: PageUpdate,
    ) -> impl Future<Output = Result<Page, StoreError>> + Send;

    /// Remove a page. Deleting the last remaining page is rejected with a
    /// validation error so at least one page always exists.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}
