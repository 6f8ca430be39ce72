//! # Ports Layer
//!
//! `KeyedStore` is the storage contract the signature chain depends on. Any
//! backend satisfying it keeps the chaining engine storage-agnostic.

use crate::domain::errors::StoreResult;
use crate::domain::lease::{AcquireOptions, KeyLease};
use std::sync::Arc;

/// Keyed repository with per-key exclusive leases.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait KeyedStore<T>: Send + Sync {
    /// Insert `item` under `id` together with its lock entry.
    ///
    /// # Errors
    /// * `StoreError::AlreadyExists` - `id` is present; the stored item is unchanged
    fn create(&self, id: &str, item: T) -> StoreResult<()>;

    /// Unconditionally upsert `item` under `id`.
    ///
    /// Callers persist mutations only while holding the key's lease.
    fn replace(&self, id: &str, item: T) -> StoreResult<()>;

    /// Copy of the item stored under `id`.
    ///
    /// # Errors
    /// * `StoreError::NotFound` - no such id
    fn get(&self, id: &str) -> StoreResult<T>;

    /// Copies of every stored item, in unspecified order. Empty when the
    /// store is empty.
    fn list(&self) -> StoreResult<Vec<T>>;

    /// Whether `id` is present.
    fn contains(&self, id: &str) -> bool;

    /// Number of stored items.
    fn len(&self) -> usize;

    /// Whether the store holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Block until the exclusive lease on `id` is free, then take it.
    ///
    /// # Errors
    /// * `StoreError::NotFound` - no lock exists for `id`
    fn acquire(&self, id: &str) -> StoreResult<KeyLease>;

    /// Take the lease on `id`, honouring a timeout and a cancellation token.
    ///
    /// # Errors
    /// * `StoreError::NotFound` - no lock exists for `id`
    /// * `StoreError::LockTimeout` - `options.timeout` elapsed
    /// * `StoreError::Cancelled` - `options.cancel` fired
    fn acquire_with(&self, id: &str, options: &AcquireOptions) -> StoreResult<KeyLease>;

    /// Explicitly give back a lease. Dropping the lease has the same effect.
    ///
    /// # Errors
    /// * `StoreError::NotFound` - the lease's id is no longer known
    fn release(&self, lease: KeyLease) -> StoreResult<()>;
}

impl<T, S> KeyedStore<T> for Arc<S>
where
    S: KeyedStore<T> + ?Sized,
{
    fn create(&self, id: &str, item: T) -> StoreResult<()> {
        (**self).create(id, item)
    }

    fn replace(&self, id: &str, item: T) -> StoreResult<()> {
        (**self).replace(id, item)
    }

    fn get(&self, id: &str) -> StoreResult<T> {
        (**self).get(id)
    }

    fn list(&self) -> StoreResult<Vec<T>> {
        (**self).list()
    }

    fn contains(&self, id: &str) -> bool {
        (**self).contains(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn acquire(&self, id: &str) -> StoreResult<KeyLease> {
        (**self).acquire(id)
    }

    fn acquire_with(&self, id: &str, options: &AcquireOptions) -> StoreResult<KeyLease> {
        (**self).acquire_with(id, options)
    }

    fn release(&self, lease: KeyLease) -> StoreResult<()> {
        (**self).release(lease)
    }
}
