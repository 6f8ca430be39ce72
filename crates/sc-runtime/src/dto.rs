//! # Wire Shapes
//!
//! JSON bodies and envelopes written by the driver.
//!
//! ```text
//! success: {"data": <payload>}
//! failure: {"status": 404, "errors": ["Not Found"]}
//! ```

use sc_02_signature_chain::{DeviceSummary, SignedTransaction};
use serde::{Deserialize, Serialize};
use shared_types::SignatureAlgorithm;

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSignatureDeviceRequest {
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Id of a newly created device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSignatureDeviceResponse {
    pub id: String,
}

/// Body of a sign request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignTransactionRequest {
    pub data_to_be_signed: String,
}

/// Result of a sign request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignTransactionResponse {
    pub signature: String,
    pub signed_data: String,
}

impl From<SignedTransaction> for SignTransactionResponse {
    fn from(signed: SignedTransaction) -> Self {
        Self {
            signature: signed.signature,
            signed_data: signed.signed_data,
        }
    }
}

/// `{id, label}` of a device. `label` is always present, empty when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDeviceResponse {
    pub id: String,
    pub label: String,
}

impl From<DeviceSummary> for GetDeviceResponse {
    fn from(summary: DeviceSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            label: summary.label.unwrap_or_default(),
        }
    }
}

/// Public key material of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    pub id: String,
    pub algorithm: SignatureAlgorithm,
    pub public_key: String,
    pub counter: u64,
}

/// Outcome of a verify request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

/// Liveness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "pass".to_string(),
            version: "v0".to_string(),
        }
    }
}

// =============================================================================
// ENVELOPES
// =============================================================================

/// Success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Response<T> {
    pub data: T,
}

/// Failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub errors: Vec<String>,
}
