//! # Chain Rules
//!
//! Pure functions defining the signature chain of a device.
//!
//! ## Payload Format
//!
//! ```text
//! "{counter}_{data}_{previous_link}"
//!
//! previous_link = base64(device_id)   when counter == 0
//!               = last_signature      otherwise
//! ```
//!
//! Neither a decimal counter nor standard base64 contains `_`, so a payload
//! splits unambiguously on its first and last underscore even when `data`
//! itself contains underscores.

use crate::domain::entities::{SignatureDevice, SignedTransaction};
use crate::domain::errors::ChainError;
use shared_crypto::SuiteRegistry;
use shared_types::{decode_base64, encode_base64, DeviceId, SignatureAlgorithm};

/// Link used by the first signature of a device.
pub fn seed_link(id: &DeviceId) -> String {
    encode_base64(id.as_str())
}

/// Link the device's next signature must embed.
pub fn previous_link(device: &SignatureDevice) -> String {
    match &device.last_signature {
        Some(signature) if device.counter > 0 => signature.clone(),
        _ => seed_link(&device.id),
    }
}

/// Build the exact payload that gets signed.
pub fn compose_payload(counter: u64, data: &str, previous_link: &str) -> String {
    format!("{}_{}_{}", counter, data, previous_link)
}

/// Decoded form of a signed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    pub counter: u64,
    pub data: String,
    pub previous_link: String,
}

/// Split a payload back into its parts. `None` when it is malformed.
pub fn parse_payload(payload: &str) -> Option<ChainLink> {
    let (counter, rest) = payload.split_once('_')?;
    let (data, previous_link) = rest.rsplit_once('_')?;

    if counter.is_empty() || !counter.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(ChainLink {
        counter: counter.parse().ok()?,
        data: data.to_string(),
        previous_link: previous_link.to_string(),
    })
}

/// Replay a device's history and report the first broken record.
///
/// `records` must be the complete history in signing order. An empty history
/// is a valid chain.
pub fn verify_chain(
    device_id: &DeviceId,
    algorithm: SignatureAlgorithm,
    public_key: &[u8],
    registry: &SuiteRegistry,
    records: &[SignedTransaction],
) -> Result<(), ChainError> {
    let suite = registry
        .resolve(algorithm)
        .map_err(ChainError::Unsupported)?;

    let mut expected_link = seed_link(device_id);

    for (index, record) in records.iter().enumerate() {
        let link =
            parse_payload(&record.signed_data).ok_or(ChainError::MalformedPayload { index })?;

        let expected = index as u64;
        if link.counter != expected {
            return Err(ChainError::CounterMismatch {
                index,
                expected,
                found: link.counter,
            });
        }
        if link.previous_link != expected_link {
            return Err(ChainError::BrokenLink { index });
        }

        let raw =
            decode_base64(&record.signature).map_err(|_| ChainError::InvalidEncoding { index })?;
        suite
            .verify(public_key, record.signed_data.as_bytes(), &raw)
            .map_err(|_| ChainError::InvalidSignature { index })?;

        expected_link = record.signature.clone();
    }

    Ok(())
}
