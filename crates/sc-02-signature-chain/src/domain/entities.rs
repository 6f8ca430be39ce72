//! # Domain Entities
//!
//! The signature device and the projections handed to callers.

use serde::{Deserialize, Serialize};
use shared_crypto::KeyPair;
use shared_types::{DeviceId, PrivateKeyBytes, SignatureAlgorithm};

// =============================================================================
// SIGNATURE DEVICE
// =============================================================================

/// A client-scoped signing identity with its chain state.
///
/// `counter` and `last_signature` only ever change together, through
/// [`SignatureDevice::record_signature`], while the device lease is held.
#[derive(Debug, Clone)]
pub struct SignatureDevice {
    /// Store key, immutable
    pub id: DeviceId,
    /// Optional human-readable label, immutable
    pub label: Option<String>,
    /// Algorithm fixed at creation
    pub algorithm: SignatureAlgorithm,
    /// Encoded private key (zeroized on drop)
    pub private_key: PrivateKeyBytes,
    /// Encoded public key
    pub public_key: Vec<u8>,
    /// Number of signatures produced so far
    pub counter: u64,
    /// Base64 text of the most recent signature; `None` iff `counter == 0`
    pub last_signature: Option<String>,
}

impl SignatureDevice {
    /// Fresh device in the `Created` state.
    pub fn new(
        id: DeviceId,
        label: Option<String>,
        algorithm: SignatureAlgorithm,
        keys: KeyPair,
    ) -> Self {
        Self {
            id,
            label,
            algorithm,
            private_key: keys.private_key,
            public_key: keys.public_key,
            counter: 0,
            last_signature: None,
        }
    }

    /// Advance the chain by one signature.
    pub fn record_signature(&mut self, signature: String) {
        self.counter += 1;
        self.last_signature = Some(signature);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DeviceState {
        match self.counter {
            0 => DeviceState::Created,
            n => DeviceState::Signed(n),
        }
    }

    /// Public `{id, label}` projection.
    pub fn summary(&self) -> DeviceSummary {
        DeviceSummary {
            id: self.id.clone(),
            label: self.label.clone(),
        }
    }
}

/// Lifecycle of a device. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// No signature produced yet
    Created,
    /// `n >= 1` signatures produced
    Signed(u64),
}

// =============================================================================
// PROJECTIONS
// =============================================================================

/// The only device shape exposed by read operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub id: DeviceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Public verification material of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePublicKey {
    pub id: DeviceId,
    pub algorithm: SignatureAlgorithm,
    /// Base64 of the encoded public key
    pub public_key: String,
    /// Signatures produced so far
    pub counter: u64,
}

/// Result of one chained signing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Base64 of the raw signature bytes
    pub signature: String,
    /// Exact payload that was signed: `"{counter}_{data}_{previous_link}"`
    pub signed_data: String,
}
