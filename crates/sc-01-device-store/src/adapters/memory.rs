//! # In-Memory Store
//!
//! Two-level locking: a coarse `RwLock` guards the item and lock tables, and
//! each id owns an `Arc<Mutex<()>>` that is cloned out of the table before a
//! caller blocks on it. A waiter on one id therefore never holds the coarse
//! guard, and never stalls `get`, `list`, or leases on other ids.

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::lease::{AcquireOptions, KeyLease};
use crate::ports::KeyedStore;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

struct Tables<T> {
    items: HashMap<String, T>,
    locks: HashMap<String, Arc<Mutex<()>>>,
}

/// Thread-safe in-memory `KeyedStore`.
pub struct InMemoryStore<T> {
    tables: RwLock<Tables<T>>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            tables: RwLock::new(Tables {
                items: HashMap::new(),
                locks: HashMap::new(),
            }),
        }
    }
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_lock(&self, id: &str) -> StoreResult<Arc<Mutex<()>>> {
        self.tables
            .read()
            .locks
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }
}

impl<T> KeyedStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync,
{
    fn create(&self, id: &str, item: T) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if tables.items.contains_key(id) {
            warn!(id, "Rejected duplicate create");
            return Err(StoreError::AlreadyExists { id: id.to_string() });
        }

        tables.items.insert(id.to_string(), item);
        tables
            .locks
            .insert(id.to_string(), Arc::new(Mutex::new(())));
        debug!(id, "Item created");
        Ok(())
    }

    fn replace(&self, id: &str, item: T) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables.items.insert(id.to_string(), item);
        tables
            .locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())));
        trace!(id, "Item replaced");
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<T> {
        self.tables
            .read()
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn list(&self) -> StoreResult<Vec<T>> {
        Ok(self.tables.read().items.values().cloned().collect())
    }

    fn contains(&self, id: &str) -> bool {
        self.tables.read().items.contains_key(id)
    }

    fn len(&self) -> usize {
        self.tables.read().items.len()
    }

    fn acquire(&self, id: &str) -> StoreResult<KeyLease> {
        // Coarse read guard is already dropped here.
        let lock = self.key_lock(id)?;

        let started = Instant::now();
        let guard = lock.lock_arc();
        let waited = started.elapsed();

        trace!(id, waited_us = waited.as_micros() as u64, "Lease acquired");
        Ok(KeyLease::new(id, waited, guard))
    }

    fn acquire_with(&self, id: &str, options: &AcquireOptions) -> StoreResult<KeyLease> {
        if options.is_unbounded() {
            return self.acquire(id);
        }

        let lock = self.key_lock(id)?;
        let started = Instant::now();

        if options.is_cancelled() {
            return Err(StoreError::Cancelled { id: id.to_string() });
        }
        if let Some(guard) = lock.try_lock_arc() {
            return Ok(KeyLease::new(id, started.elapsed(), guard));
        }

        let poll = options.poll_interval.max(Duration::from_millis(1));
        loop {
            let slice = match options.timeout {
                Some(timeout) => {
                    let elapsed = started.elapsed();
                    if elapsed >= timeout {
                        warn!(id, waited_ms = elapsed.as_millis() as u64, "Lease wait timed out");
                        return Err(StoreError::LockTimeout {
                            id: id.to_string(),
                            waited: elapsed,
                        });
                    }
                    poll.min(timeout - elapsed)
                }
                None => poll,
            };

            if let Some(guard) = lock.try_lock_arc_for(slice) {
                let waited = started.elapsed();
                trace!(id, waited_us = waited.as_micros() as u64, "Lease acquired");
                return Ok(KeyLease::new(id, waited, guard));
            }

            if options.is_cancelled() {
                debug!(id, "Lease wait cancelled");
                return Err(StoreError::Cancelled { id: id.to_string() });
            }
        }
    }

    fn release(&self, lease: KeyLease) -> StoreResult<()> {
        let known = self.tables.read().locks.contains_key(lease.id());
        if !known {
            return Err(StoreError::not_found(lease.id()));
        }
        trace!(id = lease.id(), "Lease released");
        drop(lease);
        Ok(())
    }
}
