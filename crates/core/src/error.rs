//! Error taxonomy shared between the core and its stores.

use thiserror::Error;

/// Failures from a page or cart store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Operation on an unknown page/cart id.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed payload, rejected before persistence.
    #[error("validation: {0}")]
    Validation(String),

    /// Network or filesystem failure talking to the backing store.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
