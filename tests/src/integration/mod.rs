//! # Integration Tests
//!
//! Cross-subsystem flows over a real in-memory store and real key material.
//!
//! | Module | Covers |
//! |--------|--------|
//! | `chain_flows` | Device creation, chained signing, offline replay, tampering |
//! | `concurrency` | Contended signing on one device, parallel devices, lease waits |
//! | `driver` | Line protocol end to end through the service container |

pub mod chain_flows;
pub mod concurrency;
pub mod driver;

#[cfg(test)]
pub(crate) mod fixtures {
    use sc_01_device_store::InMemoryStore;
    use sc_02_signature_chain::{
        verify_chain, ChainConfig, ChainError, LockWait, SignatureChainService, SignatureDevice,
        SignedTransaction,
    };
    use shared_crypto::{EccCurve, KeyParameters};
    use shared_types::{DeviceId, SignatureAlgorithm};
    use std::sync::Arc;

    pub type Store = Arc<InMemoryStore<SignatureDevice>>;
    pub type Service = SignatureChainService<Store>;

    /// RSA keys kept small so key generation stays fast in tests.
    pub const TEST_RSA_BITS: usize = 1024;

    pub fn chain_config(curve: EccCurve) -> ChainConfig {
        let params = KeyParameters::new(TEST_RSA_BITS, curve).unwrap();
        ChainConfig::new(params)
    }

    pub fn build(config: &ChainConfig) -> (Store, Arc<Service>) {
        let store: Store = Arc::new(InMemoryStore::new());
        let service = Arc::new(SignatureChainService::new(Arc::clone(&store), config));
        (store, service)
    }

    pub fn service() -> (Store, Arc<Service>) {
        build(&chain_config(EccCurve::P256))
    }

    pub fn bounded_service(wait: std::time::Duration) -> (Store, Arc<Service>) {
        build(&chain_config(EccCurve::P256).with_lock_wait(LockWait::Bounded(wait)))
    }

    /// Replay `records` against the stored device's public key.
    pub fn replay(
        store: &Store,
        service: &Service,
        id: &DeviceId,
        records: &[SignedTransaction],
    ) -> Result<(), ChainError> {
        use sc_01_device_store::KeyedStore;

        let device = store.get(id.as_str()).unwrap();
        verify_chain(
            id,
            device.algorithm,
            &device.public_key,
            service.registry(),
            records,
        )
    }

    pub fn algorithms() -> [SignatureAlgorithm; 2] {
        [SignatureAlgorithm::Rsa, SignatureAlgorithm::Ecc]
    }
}
