//! # SHA-256 Hashing
//!
//! Every suite signs the SHA-256 digest of the composed payload, so the
//! digest function is fixed here rather than per algorithm.

use sha2::{Digest, Sha256};

/// SHA-256 output (256-bit).
pub type Digest256 = [u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Digest256 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short hex fingerprint of an encoded public key, for logs.
pub fn key_fingerprint(public_key: &[u8]) -> String {
    hex::encode(&sha256(public_key)[..8])
}
