//! # Error Types
//!
//! Parse errors for the shared value types.

use thiserror::Error;

/// Errors raised while parsing shared value types from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Algorithm name is not one of the supported variants.
    #[error("Unsupported signature algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Input is not valid standard base64.
    #[error("Invalid base64 input: {0}")]
    InvalidBase64(String),
}
