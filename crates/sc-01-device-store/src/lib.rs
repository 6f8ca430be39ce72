//! # Device Store (SC-01)
//!
//! Keyed, concurrency-safe repository for signature devices.
//!
//! ## Concurrency Model
//!
//! ```text
//!                 ┌───────────── coarse RwLock ─────────────┐
//!  create ──────→ │ items: id → T      locks: id → Mutex<()> │
//!  get / list ──→ └─────────────────────────────────────────┘
//!                                          │ Arc clone, guard dropped
//!                                          ↓
//!  acquire(id) ─────────────────→ per-key Mutex  (blocks only this id)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Unique Keys | `create` on an existing id fails and leaves the record untouched |
//! | 2 | Lockable Keys | Every stored id has a lock entry, inserted atomically with it |
//! | 3 | Value Copies | `get`/`list` return clones, never shared mutable state |
//! | 4 | Independent Keys | Holding one id's lease never blocks another id |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Errors, leases, acquisition options
//! - `ports/` - The `KeyedStore` trait every backend implements
//! - `adapters/` - `InMemoryStore`

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryStore;
pub use domain::errors::{StoreError, StoreResult};
pub use domain::lease::{AcquireOptions, CancellationToken, KeyLease};
pub use ports::KeyedStore;
