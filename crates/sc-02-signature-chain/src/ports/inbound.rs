//! # Inbound Ports (Driving Ports / API)
//!
//! The operations a boundary (CLI, HTTP handler, test) drives.

use crate::domain::entities::{DevicePublicKey, DeviceSummary, SignedTransaction};
use crate::domain::errors::SigningServiceError;
use sc_01_device_store::CancellationToken;
use shared_types::{DeviceId, SignatureAlgorithm};

/// Signature device operations.
pub trait SignatureDeviceApi: Send + Sync {
    /// Create a device with a fresh key pair.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - algorithm not enabled
    /// * `KeyGeneration` - key pair generation failed
    /// * `AlreadyExists` - id collision; the existing device is untouched
    /// * `Persistence` - any other store failure
    fn create_device(
        &self,
        algorithm: SignatureAlgorithm,
        label: Option<String>,
    ) -> Result<DeviceId, SigningServiceError>;

    /// `create_device` taking the algorithm's wire name (`"RSA"`, `"ECC"`).
    fn create_device_named(
        &self,
        algorithm: &str,
        label: Option<String>,
    ) -> Result<DeviceId, SigningServiceError> {
        let algorithm: SignatureAlgorithm = algorithm
            .parse()
            .map_err(|_| SigningServiceError::UnsupportedAlgorithm(algorithm.to_string()))?;
        self.create_device(algorithm, label)
    }

    /// Sign `data` as the next link of the device's chain.
    ///
    /// # Errors
    /// * `Validation` - `data` is empty
    /// * `NotFound` - unknown device
    /// * `Signing` - the signer failed; the device is unchanged
    /// * `Persistence` - the updated device could not be stored
    /// * `LockTimeout` - bounded lease wait elapsed
    fn sign_transaction(
        &self,
        id: &DeviceId,
        data: &str,
    ) -> Result<SignedTransaction, SigningServiceError>;

    /// `sign_transaction` whose lease wait can be cancelled.
    ///
    /// # Errors
    /// As `sign_transaction`, plus `Cancelled` once `cancel` fires.
    fn sign_transaction_with(
        &self,
        id: &DeviceId,
        data: &str,
        cancel: &CancellationToken,
    ) -> Result<SignedTransaction, SigningServiceError>;

    /// `{id, label}` of one device.
    fn get_device(&self, id: &DeviceId) -> Result<DeviceSummary, SigningServiceError>;

    /// `{id, label}` of every device, ordered by id.
    fn list_devices(&self) -> Result<Vec<DeviceSummary>, SigningServiceError>;

    /// Public key material for offline verification.
    fn device_public_key(&self, id: &DeviceId) -> Result<DevicePublicKey, SigningServiceError>;

    /// Check a base64 `signature` over `signed_data` with the device's key.
    ///
    /// # Errors
    /// * `Validation` - `signature` is not base64
    /// * `NotFound` - unknown device
    /// * `Signing` - the signature does not verify
    fn verify_signature(
        &self,
        id: &DeviceId,
        signed_data: &str,
        signature: &str,
    ) -> Result<(), SigningServiceError>;
}
