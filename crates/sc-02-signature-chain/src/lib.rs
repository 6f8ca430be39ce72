//! # Signature Chain Subsystem (SC-02)
//!
//! Issues signature devices and signs client data as a tamper-evident,
//! append-only chain per device.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Entities, chain rules and errors, no I/O
//! - **Ports Layer** (`ports/`): `SignatureDeviceApi` in, `DeviceRepository` and `IdGenerator` out
//! - **Service Layer** (`service.rs`): Wires the chain rules to storage and crypto
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Monotonic Counter | Each successful sign advances `counter` by exactly one |
//! | 2 | Linked History | Signature `k` embeds signature `k-1`, signature 0 embeds `base64(id)` |
//! | 3 | Atomic Advance | `counter` and `last_signature` change together, under the device lease |
//! | 4 | No Partial State | A failed sign leaves the stored device unchanged |
//!
//! ## Usage
//!
//! ```rust,ignore
//! let store = Arc::new(InMemoryStore::new());
//! let service = SignatureChainService::new(store, &ChainConfig::new(params));
//!
//! let id = service.create_device(SignatureAlgorithm::Ecc, Some("till".into()))?;
//! let signed = service.sign_transaction(&id, "receipt-1")?;
//! ```

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{ChainConfig, LockWait};
pub use domain::chain::{
    compose_payload, parse_payload, previous_link, seed_link, verify_chain, ChainLink,
};
pub use domain::entities::{
    DevicePublicKey, DeviceState, DeviceSummary, SignatureDevice, SignedTransaction,
};
pub use domain::errors::{ChainError, ErrorKind, SigningServiceError};
pub use ports::inbound::SignatureDeviceApi;
pub use ports::outbound::{DeviceRepository, IdGenerator, UuidGenerator};
pub use service::SignatureChainService;
