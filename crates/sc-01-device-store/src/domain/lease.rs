//! # Key Leases
//!
//! A `KeyLease` is the scoped ownership of one id's exclusive lock. Dropping
//! the lease releases the lock, so every exit path of a critical section
//! (success, `?` propagation, panic unwinding) gives the key back.

use lock_api::ArcMutexGuard;
use parking_lot::RawMutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Exclusive, RAII lease on a single store key.
pub struct KeyLease {
    id: String,
    waited: Duration,
    _guard: ArcMutexGuard<RawMutex, ()>,
}

impl KeyLease {
    pub(crate) fn new(id: &str, waited: Duration, guard: ArcMutexGuard<RawMutex, ()>) -> Self {
        Self {
            id: id.to_string(),
            waited,
            _guard: guard,
        }
    }

    /// Key this lease covers.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// How long the caller waited before the lease was granted.
    pub fn waited(&self) -> Duration {
        self.waited
    }
}

impl fmt::Debug for KeyLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyLease")
            .field("id", &self.id)
            .field("waited", &self.waited)
            .finish()
    }
}

/// Cooperative cancellation signal shared between a caller and a lock wait.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token in the non-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether `cancel` has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Options for a bounded, cancellable lease acquisition.
#[derive(Clone, Debug)]
pub struct AcquireOptions {
    /// Give up with `LockTimeout` after this long. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Give up with `Cancelled` once this token fires.
    pub cancel: Option<CancellationToken>,
    /// Granularity at which the cancel token is re-checked.
    pub poll_interval: Duration,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            cancel: None,
            poll_interval: Duration::from_millis(10),
        }
    }
}

impl AcquireOptions {
    /// Wait at most `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abort the wait when `token` is cancelled.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Whether these options reduce to a plain blocking acquire.
    pub fn is_unbounded(&self) -> bool {
        self.timeout.is_none() && self.cancel.is_none()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}
