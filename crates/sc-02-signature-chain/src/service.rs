//! # Signature Chain Service
//!
//! Application service implementing `SignatureDeviceApi`.
//!
//! ## Architecture
//!
//! - Implements the inbound port (`SignatureDeviceApi`)
//! - Persists devices through the outbound `DeviceRepository`
//! - Draws ids from the outbound `IdGenerator`
//! - Delegates key generation and signing to `shared-crypto` suites
//!
//! ## Sign Critical Section
//!
//! ```text
//! get(id) ─→ acquire lease ─→ get(id) again ─→ link + payload ─→ sign
//!                                                                  │
//!            release lease ←─ replace(id) ←─ counter += 1 ←────────┘
//! ```
//!
//! The device is re-read under the lease so the counter and link are never
//! taken from a snapshot that another signer has since advanced. Any failure
//! before `replace` leaves the stored device untouched.

use crate::config::{ChainConfig, LockWait};
use crate::domain::chain;
use crate::domain::entities::{
    DevicePublicKey, DeviceSummary, SignatureDevice, SignedTransaction,
};
use crate::domain::errors::{ErrorKind, SigningServiceError};
use crate::ports::inbound::SignatureDeviceApi;
use crate::ports::outbound::{DeviceRepository, IdGenerator, UuidGenerator};
use sc_01_device_store::{CancellationToken, KeyLease, StoreError};
use sc_telemetry::metrics::{self, SignOutcome};
use shared_crypto::{key_fingerprint, SuiteRegistry};
use shared_types::{decode_base64, encode_base64, DeviceId, SignatureAlgorithm};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Signature chaining engine.
///
/// `Send + Sync` whenever its store and id generator are; share it via `Arc`.
pub struct SignatureChainService<S, G = UuidGenerator> {
    store: S,
    ids: G,
    registry: SuiteRegistry,
    lock_wait: LockWait,
}

impl<S: DeviceRepository> SignatureChainService<S> {
    /// Create a service generating UUID v4 device ids.
    pub fn new(store: S, config: &ChainConfig) -> Self {
        Self::with_id_generator(store, UuidGenerator, config)
    }
}

impl<S: DeviceRepository, G: IdGenerator> SignatureChainService<S, G> {
    /// Create a service with a custom id source.
    pub fn with_id_generator(store: S, ids: G, config: &ChainConfig) -> Self {
        Self {
            store,
            ids,
            registry: config.registry(),
            lock_wait: config.lock_wait,
        }
    }

    /// Registry used for key generation, signing and verification.
    pub fn registry(&self) -> &SuiteRegistry {
        &self.registry
    }

    fn load(&self, id: &DeviceId) -> Result<SignatureDevice, SigningServiceError> {
        self.store.get(id.as_str()).map_err(SigningServiceError::from)
    }

    fn acquire_lease(
        &self,
        id: &DeviceId,
        cancel: Option<&CancellationToken>,
    ) -> Result<KeyLease, SigningServiceError> {
        let lease = match (self.lock_wait, cancel) {
            (LockWait::Unbounded, None) => self.store.acquire(id.as_str()),
            (policy, cancel) => self
                .store
                .acquire_with(id.as_str(), &policy.to_options(cancel)),
        }
        .map_err(SigningServiceError::from)?;

        metrics::record_lock_wait(lease.waited());
        Ok(lease)
    }

    fn sign_chained(
        &self,
        id: &DeviceId,
        data: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<SignedTransaction, SigningServiceError> {
        if data.is_empty() {
            return Err(SigningServiceError::Validation(
                "data_to_be_signed must not be empty".to_string(),
            ));
        }

        let algorithm = self.load(id)?.algorithm;

        let lease = match self.acquire_lease(id, cancel) {
            Ok(lease) => lease,
            Err(err) => {
                warn!(device_id = %id, error = %err, "Could not lease device for signing");
                let outcome = match err.kind() {
                    ErrorKind::LockTimeout | ErrorKind::Cancelled => SignOutcome::Timeout,
                    _ => SignOutcome::Failure,
                };
                metrics::record_signature(algorithm.as_str(), outcome, Duration::ZERO);
                return Err(err);
            }
        };

        let started = Instant::now();
        let result = self.sign_under_lease(id, data);
        let elapsed = started.elapsed();

        if let Err(err) = self.store.release(lease) {
            warn!(device_id = %id, error = %err, "Lease release reported an error");
        }

        match &result {
            Ok(_) => metrics::record_signature(algorithm.as_str(), SignOutcome::Success, elapsed),
            Err(err) => {
                warn!(device_id = %id, error = %err, "Signing failed");
                metrics::record_signature(algorithm.as_str(), SignOutcome::Failure, elapsed);
            }
        }
        result
    }

    fn sign_under_lease(
        &self,
        id: &DeviceId,
        data: &str,
    ) -> Result<SignedTransaction, SigningServiceError> {
        let mut device = self.load(id)?;

        let link = chain::previous_link(&device);
        let payload = chain::compose_payload(device.counter, data, &link);

        let suite = self
            .registry
            .resolve(device.algorithm)
            .map_err(|_| SigningServiceError::UnsupportedAlgorithm(device.algorithm.to_string()))?;
        let raw = suite
            .sign(device.private_key.as_bytes(), payload.as_bytes())
            .map_err(SigningServiceError::Signing)?;
        let signature = encode_base64(raw);

        let counter = device.counter;
        device.record_signature(signature.clone());
        self.store
            .replace(id.as_str(), device)
            .map_err(|e| SigningServiceError::Persistence(e.to_string()))?;

        debug!(device_id = %id, counter, "Transaction signed");
        Ok(SignedTransaction {
            signature,
            signed_data: payload,
        })
    }
}

impl<S: DeviceRepository, G: IdGenerator> SignatureDeviceApi for SignatureChainService<S, G> {
    fn create_device(
        &self,
        algorithm: SignatureAlgorithm,
        label: Option<String>,
    ) -> Result<DeviceId, SigningServiceError> {
        let suite = self
            .registry
            .resolve(algorithm)
            .map_err(|_| SigningServiceError::UnsupportedAlgorithm(algorithm.to_string()))?;

        let id = self.ids.next_id();
        let keys = suite
            .generate()
            .map_err(SigningServiceError::KeyGeneration)?;

        let fingerprint = key_fingerprint(&keys.public_key);
        let device = SignatureDevice::new(id.clone(), label, algorithm, keys);
        self.store
            .create(id.as_str(), device)
            .map_err(|e| match e {
                StoreError::AlreadyExists { id } => {
                    warn!(device_id = %id, "Generated device id collided");
                    SigningServiceError::AlreadyExists(id)
                }
                other => SigningServiceError::Persistence(other.to_string()),
            })?;

        metrics::record_device_created(algorithm.as_str());
        info!(
            device_id = %id,
            algorithm = %algorithm,
            key = %fingerprint,
            "Signature device created"
        );
        Ok(id)
    }

    fn sign_transaction(
        &self,
        id: &DeviceId,
        data: &str,
    ) -> Result<SignedTransaction, SigningServiceError> {
        self.sign_chained(id, data, None)
    }

    fn sign_transaction_with(
        &self,
        id: &DeviceId,
        data: &str,
        cancel: &CancellationToken,
    ) -> Result<SignedTransaction, SigningServiceError> {
        self.sign_chained(id, data, Some(cancel))
    }

    fn get_device(&self, id: &DeviceId) -> Result<DeviceSummary, SigningServiceError> {
        Ok(self.load(id)?.summary())
    }

    fn list_devices(&self) -> Result<Vec<DeviceSummary>, SigningServiceError> {
        let devices = self
            .store
            .list()
            .map_err(|e| SigningServiceError::Persistence(e.to_string()))?;

        let mut summaries: Vec<DeviceSummary> =
            devices.iter().map(SignatureDevice::summary).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }

    fn device_public_key(&self, id: &DeviceId) -> Result<DevicePublicKey, SigningServiceError> {
        let device = self.load(id)?;
        Ok(DevicePublicKey {
            id: device.id.clone(),
            algorithm: device.algorithm,
            public_key: encode_base64(&device.public_key),
            counter: device.counter,
        })
    }

    fn verify_signature(
        &self,
        id: &DeviceId,
        signed_data: &str,
        signature: &str,
    ) -> Result<(), SigningServiceError> {
        let raw = decode_base64(signature)
            .map_err(|e| SigningServiceError::Validation(e.to_string()))?;
        let device = self.load(id)?;

        let suite = self
            .registry
            .resolve(device.algorithm)
            .map_err(|_| SigningServiceError::UnsupportedAlgorithm(device.algorithm.to_string()))?;
        suite
            .verify(&device.public_key, signed_data.as_bytes(), &raw)
            .map_err(SigningServiceError::Signing)
    }
}
