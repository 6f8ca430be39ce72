//! # Shared Entities
//!
//! Identity and algorithm types for signature devices.

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

// =============================================================================
// DEVICE IDENTITY
// =============================================================================

/// Opaque, immutable identifier of a signature device.
///
/// Generated once at creation (UUID v4 text) and used as the store key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DeviceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// =============================================================================
// SIGNATURE ALGORITHM
// =============================================================================

/// Signature algorithm of a device, fixed at creation.
///
/// Wire names are `"RSA"` and `"ECC"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// RSA with PKCS#1 v1.5 padding over SHA-256.
    #[serde(rename = "RSA")]
    Rsa,
    /// ECDSA over SHA-256 with an ASN.1 DER signature.
    #[serde(rename = "ECC")]
    Ecc,
}

impl SignatureAlgorithm {
    /// Every supported variant.
    pub const ALL: [SignatureAlgorithm; 2] = [SignatureAlgorithm::Rsa, SignatureAlgorithm::Ecc];

    /// Wire name of the algorithm.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Rsa => "RSA",
            SignatureAlgorithm::Ecc => "ECC",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = ParseError;

    /// Parse a wire name. Matching is ASCII case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseError::UnknownAlgorithm(s.to_string()))
    }
}

// =============================================================================
// KEY MATERIAL
// =============================================================================

/// Encoded private key bytes. Zeroized on drop, never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyBytes(Vec<u8>);

impl PrivateKeyBytes {
    /// Take ownership of encoded key bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the encoded key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the encoded key in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the encoded key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for PrivateKeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKeyBytes(<redacted {} bytes>)", self.0.len())
    }
}
