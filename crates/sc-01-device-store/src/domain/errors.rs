//! # Store Errors

use std::time::Duration;
use thiserror::Error;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// An item with this id already exists (INVARIANT-1).
    #[error("Item already exists: {id}")]
    AlreadyExists { id: String },

    /// No item (or lock) exists for this id.
    #[error("Item not found: {id}")]
    NotFound { id: String },

    /// Bounded lock wait elapsed before the lease became free.
    #[error("Timed out after {waited:?} waiting for lock on {id}")]
    LockTimeout { id: String, waited: Duration },

    /// The caller cancelled the lock wait.
    #[error("Lock wait cancelled for {id}")]
    Cancelled { id: String },

    /// The backing storage failed. `InMemoryStore` never returns this.
    #[error("Store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) fn not_found(id: &str) -> Self {
        StoreError::NotFound { id: id.to_string() }
    }
}
