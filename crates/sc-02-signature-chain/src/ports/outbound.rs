//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the chaining engine needs from the outside.

use crate::domain::entities::SignatureDevice;
use sc_01_device_store::KeyedStore;
use shared_types::DeviceId;

/// Storage for signature devices.
///
/// Any `KeyedStore<SignatureDevice>` qualifies.
pub trait DeviceRepository: KeyedStore<SignatureDevice> {}

impl<S> DeviceRepository for S where S: KeyedStore<SignatureDevice> {}

/// Source of new device ids.
pub trait IdGenerator: Send + Sync {
    /// Produce the id for the next device.
    fn next_id(&self) -> DeviceId;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> DeviceId {
        DeviceId::generate()
    }
}
