//! # Ports Layer
//!
//! - `inbound` - `SignatureDeviceApi`, what callers drive
//! - `outbound` - id generation and the device repository this engine needs

pub mod inbound;
pub mod outbound;
