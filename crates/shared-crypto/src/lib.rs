//! # Shared Crypto - Signature Device Primitives
//!
//! The signer/key-generator capability behind every signature device.
//!
//! ## Components
//!
//! | Module | Algorithm | Key Encoding |
//! |--------|-----------|--------------|
//! | `rsa_pkcs1` | RSA PKCS#1 v1.5 / SHA-256 | PKCS#1 DER (private + public) |
//! | `ecc` | ECDSA / SHA-256 (secp256k1, P-256, P-384) | SEC1 DER private, SPKI DER public |
//! | `suite` | `AlgorithmSuite` + `SuiteRegistry` | - |
//! | `hashing` | SHA-256 | - |
//!
//! ## Security Properties
//!
//! - Key sizes and curves are injected via `KeyParameters`; there is no
//!   built-in default.
//! - ECDSA nonces are RFC 6979 deterministic; RSA signing uses blinding.
//! - Private key bytes are zeroized on drop and redacted from `Debug`.
//! - Key encodings never leave this crate's API as anything but opaque bytes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecc;
pub mod errors;
pub mod hashing;
pub mod params;
pub mod rsa_pkcs1;
pub mod suite;

// Re-exports
pub use ecc::EccSuite;
pub use errors::CryptoError;
pub use hashing::{key_fingerprint, sha256, Digest256};
pub use params::{EccCurve, KeyParameters, MAX_RSA_BITS, MIN_RSA_BITS};
pub use rsa_pkcs1::RsaSuite;
pub use suite::{AlgorithmSuite, KeyPair, SuiteRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
