//! # Shared Types Crate
//!
//! Types shared by every Sigchain subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `DeviceId` and `SignatureAlgorithm` are defined
//!   once and used by the crypto, storage and signing crates.
//! - **Closed Algorithm Set**: `SignatureAlgorithm` is an exhaustive enum; new
//!   algorithms are a compile-time change, never a runtime string.
//! - **Opaque Keys**: key material travels as `PrivateKeyBytes` / `Vec<u8>`
//!   whose encoding is owned by `shared-crypto`.

pub mod encoding;
pub mod entities;
pub mod errors;

pub use encoding::{decode_base64, encode_base64};
pub use entities::*;
pub use errors::*;
