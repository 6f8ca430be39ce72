//! # Engine Configuration
//!
//! Security parameters, enabled algorithms and the lease wait policy. Key
//! parameters have no default here; the runtime config supplies them.

use sc_01_device_store::{AcquireOptions, CancellationToken};
use shared_crypto::{KeyParameters, SuiteRegistry};
use shared_types::SignatureAlgorithm;
use std::time::Duration;

/// How long a sign waits for a busy device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockWait {
    /// Block until the device is free.
    #[default]
    Unbounded,
    /// Fail with `LockTimeout` after this long.
    Bounded(Duration),
}

impl LockWait {
    /// Lease acquisition options for this policy plus an optional cancel token.
    pub fn to_options(self, cancel: Option<&CancellationToken>) -> AcquireOptions {
        let mut options = AcquireOptions::default();
        if let LockWait::Bounded(timeout) = self {
            options = options.with_timeout(timeout);
        }
        if let Some(token) = cancel {
            options = options.with_cancel(token.clone());
        }
        options
    }
}

/// Configuration for the chaining engine.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// RSA modulus size and ECC curve for new keys
    pub key_parameters: KeyParameters,

    /// Algorithms devices may be created with (and sign with)
    pub enabled_algorithms: Vec<SignatureAlgorithm>,

    /// Lease wait policy for `sign_transaction`
    pub lock_wait: LockWait,
}

impl ChainConfig {
    /// All algorithms enabled, unbounded lease waits.
    pub fn new(key_parameters: KeyParameters) -> Self {
        Self {
            key_parameters,
            enabled_algorithms: SignatureAlgorithm::ALL.to_vec(),
            lock_wait: LockWait::Unbounded,
        }
    }

    /// Restrict the enabled algorithms.
    pub fn with_algorithms(mut self, algorithms: &[SignatureAlgorithm]) -> Self {
        self.enabled_algorithms = algorithms.to_vec();
        self
    }

    /// Set the lease wait policy.
    pub fn with_lock_wait(mut self, lock_wait: LockWait) -> Self {
        self.lock_wait = lock_wait;
        self
    }

    /// Suite registry for the enabled algorithms.
    pub fn registry(&self) -> SuiteRegistry {
        SuiteRegistry::with_algorithms(self.key_parameters, &self.enabled_algorithms)
    }
}
