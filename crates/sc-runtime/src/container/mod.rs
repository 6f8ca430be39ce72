//! # Service Container
//!
//! Holds the configured store and chaining engine for the process lifetime.

pub mod config;

pub use config::{ConfigError, ServiceConfig};

use sc_01_device_store::InMemoryStore;
use sc_02_signature_chain::{SignatureChainService, SignatureDevice};
use std::sync::Arc;
use tracing::info;

/// Concrete device store.
pub type DeviceStore = InMemoryStore<SignatureDevice>;

/// Concrete chaining engine over the shared store.
pub type ChainService = SignatureChainService<Arc<DeviceStore>>;

/// Dependency container built once at startup.
pub struct ServiceContainer {
    /// Configuration the container was built from.
    pub config: ServiceConfig,
    /// Device store shared with the engine.
    pub store: Arc<DeviceStore>,
    /// Chaining engine, shareable across threads.
    pub service: Arc<ChainService>,
}

impl ServiceContainer {
    /// Build the store and engine from `config`.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        let chain_config = config.chain_config()?;
        let store = Arc::new(DeviceStore::new());
        let service = Arc::new(SignatureChainService::new(
            Arc::clone(&store),
            &chain_config,
        ));

        info!(
            rsa_bits = config.rsa_key_bits,
            ecc_curve = %config.ecc_curve,
            algorithms = ?config.algorithms,
            lock_timeout_ms = config.lock_timeout.map(|t| t.as_millis() as u64),
            "Service container initialized"
        );

        Ok(Self {
            config,
            store,
            service,
        })
    }
}
