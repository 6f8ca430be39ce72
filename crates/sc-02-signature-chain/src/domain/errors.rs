//! # Service Errors
//!
//! Error types for the chaining engine and for offline chain replay.

use sc_01_device_store::StoreError;
use shared_crypto::CryptoError;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by the signature device operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningServiceError {
    /// Caller input is invalid (empty data, undecodable signature)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No device with this id
    #[error("Signature device not found: {0}")]
    NotFound(String),

    /// Generated id collided with an existing device
    #[error("Signature device already exists: {0}")]
    AlreadyExists(String),

    /// Algorithm unknown or not enabled
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key pair could not be generated
    #[error("Key generation failed: {0}")]
    KeyGeneration(CryptoError),

    /// Signing (or verification) primitive failed
    #[error("Signing failed: {0}")]
    Signing(CryptoError),

    /// Store rejected a write. Details stay in logs, never on the wire.
    #[error("Internal storage failure")]
    Persistence(String),

    /// Bounded lease wait elapsed
    #[error("Timed out after {waited:?} waiting for device {id}")]
    LockTimeout { id: String, waited: Duration },

    /// Caller cancelled the lease wait
    #[error("Operation cancelled while waiting for device {0}")]
    Cancelled(String),
}

/// Fieldless discriminant of [`SigningServiceError`], for boundary mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AlreadyExists,
    UnsupportedAlgorithm,
    KeyGeneration,
    Signing,
    Persistence,
    LockTimeout,
    Cancelled,
}

impl SigningServiceError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SigningServiceError::Validation(_) => ErrorKind::Validation,
            SigningServiceError::NotFound(_) => ErrorKind::NotFound,
            SigningServiceError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            SigningServiceError::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            SigningServiceError::KeyGeneration(_) => ErrorKind::KeyGeneration,
            SigningServiceError::Signing(_) => ErrorKind::Signing,
            SigningServiceError::Persistence(_) => ErrorKind::Persistence,
            SigningServiceError::LockTimeout { .. } => ErrorKind::LockTimeout,
            SigningServiceError::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<StoreError> for SigningServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => SigningServiceError::NotFound(id),
            StoreError::AlreadyExists { id } => SigningServiceError::AlreadyExists(id),
            StoreError::LockTimeout { id, waited } => {
                SigningServiceError::LockTimeout { id, waited }
            }
            StoreError::Cancelled { id } => SigningServiceError::Cancelled(id),
            StoreError::Backend(detail) => SigningServiceError::Persistence(detail),
        }
    }
}

/// First defect found while replaying a device's signature history.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// Counters must run 0, 1, 2, ... without gaps
    #[error("Record {index}: expected counter {expected}, found {found}")]
    CounterMismatch {
        index: usize,
        expected: u64,
        found: u64,
    },

    /// `signed_data` is not `"{counter}_{data}_{link}"`
    #[error("Record {index}: malformed signed data")]
    MalformedPayload { index: usize },

    /// Previous link is neither the seed nor the predecessor's signature
    #[error("Record {index}: previous link does not match the chain")]
    BrokenLink { index: usize },

    /// Signature text is not base64
    #[error("Record {index}: signature is not valid base64")]
    InvalidEncoding { index: usize },

    /// Signature does not verify under the device public key
    #[error("Record {index}: signature does not verify")]
    InvalidSignature { index: usize },

    /// The device's algorithm is not available for verification
    #[error("Cannot verify chain: {0}")]
    Unsupported(CryptoError),
}

impl ChainError {
    /// Index of the offending record, if the failure is record-specific.
    pub fn index(&self) -> Option<usize> {
        match self {
            ChainError::CounterMismatch { index, .. }
            | ChainError::MalformedPayload { index }
            | ChainError::BrokenLink { index }
            | ChainError::InvalidEncoding { index }
            | ChainError::InvalidSignature { index } => Some(*index),
            ChainError::Unsupported(_) => None,
        }
    }
}
