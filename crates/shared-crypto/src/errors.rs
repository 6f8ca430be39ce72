//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Key generation failed (entropy or primitive failure)
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Key parameters are outside the accepted range
    #[error("Invalid key parameters: {0}")]
    InvalidKeyParameters(String),

    /// Private key bytes could not be parsed
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Public key bytes could not be parsed
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signing primitive failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Algorithm or curve is not registered
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
