//! # Text Encoding
//!
//! Signatures and public keys cross the boundary as standard base64 (with
//! padding). The chain seed uses the same alphabet, so verifiers only ever
//! need one decoder.

use crate::errors::ParseError;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encode bytes as standard padded base64.
pub fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard padded base64.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, ParseError> {
    STANDARD
        .decode(text)
        .map_err(|e| ParseError::InvalidBase64(e.to_string()))
}
