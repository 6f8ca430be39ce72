//! # ECDSA Signatures (secp256k1, P-256, P-384)
//!
//! ## Key Encoding
//!
//! - Private keys: SEC1 `ECPrivateKey` DER, always carrying the named-curve
//!   parameter.
//! - Public keys: SubjectPublicKeyInfo DER.
//!
//! The curve of an existing key is read back from its encoding, so keys made
//! under one configured curve keep signing after the configuration changes.
//!
//! ## Signing
//!
//! The SHA-256 digest of the message is signed as a prehash (RFC 6979
//! deterministic nonces) and the result is emitted as an ASN.1 DER
//! `Ecdsa-Sig-Value`.

use crate::hashing::{sha256, Digest256};
use crate::params::EccCurve;
use crate::suite::KeyPair;
use crate::CryptoError;

macro_rules! curve_ops {
    ($module:ident, $krate:ident) => {
        mod $module {
            use super::{CryptoError, Digest256, KeyPair};
            use $krate::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
            use $krate::ecdsa::{Signature, SigningKey, VerifyingKey};
            use $krate::pkcs8::{DecodePublicKey, EncodePublicKey};
            use $krate::SecretKey;
            use zeroize::Zeroizing;

            pub(super) fn generate() -> Result<KeyPair, CryptoError> {
                let secret = SecretKey::random(&mut rand::thread_rng());

                let private_der: Zeroizing<Vec<u8>> = secret
                    .to_sec1_der()
                    .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
                let public_der = secret
                    .public_key()
                    .to_public_key_der()
                    .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;

                Ok(KeyPair::new(
                    private_der.to_vec(),
                    public_der.as_bytes().to_vec(),
                ))
            }

            pub(super) fn owns_private_key(private_key: &[u8]) -> bool {
                SecretKey::from_sec1_der(private_key).is_ok()
            }

            pub(super) fn owns_public_key(public_key: &[u8]) -> bool {
                VerifyingKey::from_public_key_der(public_key).is_ok()
            }

            pub(super) fn sign(
                private_key: &[u8],
                digest: &Digest256,
            ) -> Result<Vec<u8>, CryptoError> {
                let secret = SecretKey::from_sec1_der(private_key)
                    .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
                let signing_key = SigningKey::from(secret);

                let signature: Signature = signing_key
                    .sign_prehash(digest)
                    .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

                Ok(signature.to_der().as_bytes().to_vec())
            }

            pub(super) fn verify(
                public_key: &[u8],
                digest: &Digest256,
                signature: &[u8],
            ) -> Result<(), CryptoError> {
                let verifying_key = VerifyingKey::from_public_key_der(public_key)
                    .map_err(|_| CryptoError::InvalidPublicKey)?;
                let signature =
                    Signature::from_der(signature).map_err(|_| CryptoError::InvalidSignatureFormat)?;

                verifying_key
                    .verify_prehash(digest, &signature)
                    .map_err(|_| CryptoError::SignatureVerificationFailed)
            }
        }
    };
}

curve_ops!(secp256k1_ops, k256);
curve_ops!(p256_ops, p256);
curve_ops!(p384_ops, p384);

/// ECDSA key generator and signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EccSuite {
    curve: EccCurve,
}

impl EccSuite {
    /// Create a suite generating keys on `curve`.
    pub fn new(curve: EccCurve) -> Self {
        Self { curve }
    }

    /// Curve used for newly generated keys.
    pub fn curve(&self) -> EccCurve {
        self.curve
    }

    /// Generate a fresh key pair on the configured curve.
    pub fn generate(&self) -> Result<KeyPair, CryptoError> {
        match self.curve {
            EccCurve::Secp256k1 => secp256k1_ops::generate(),
            EccCurve::P256 => p256_ops::generate(),
            EccCurve::P384 => p384_ops::generate(),
        }
    }

    /// Sign `message` with a SEC1 DER private key on any supported curve.
    pub fn sign(&self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let curve = detect_private_key_curve(private_key)?;
        let digest = sha256(message);
        match curve {
            EccCurve::Secp256k1 => secp256k1_ops::sign(private_key, &digest),
            EccCurve::P256 => p256_ops::sign(private_key, &digest),
            EccCurve::P384 => p384_ops::sign(private_key, &digest),
        }
    }

    /// Verify a DER signature over `message` with an SPKI DER public key.
    pub fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        let curve = detect_public_key_curve(public_key)?;
        let digest = sha256(message);
        match curve {
            EccCurve::Secp256k1 => secp256k1_ops::verify(public_key, &digest, signature),
            EccCurve::P256 => p256_ops::verify(public_key, &digest, signature),
            EccCurve::P384 => p384_ops::verify(public_key, &digest, signature),
        }
    }
}

/// Identify the curve of a SEC1 DER private key from its named-curve OID.
pub fn detect_private_key_curve(private_key: &[u8]) -> Result<EccCurve, CryptoError> {
    EccCurve::ALL
        .into_iter()
        .find(|curve| match curve {
            EccCurve::Secp256k1 => secp256k1_ops::owns_private_key(private_key),
            EccCurve::P256 => p256_ops::owns_private_key(private_key),
            EccCurve::P384 => p384_ops::owns_private_key(private_key),
        })
        .ok_or_else(|| {
            CryptoError::InvalidPrivateKey("not a SEC1 key on a supported curve".to_string())
        })
}

/// Identify the curve of an SPKI DER public key.
pub fn detect_public_key_curve(public_key: &[u8]) -> Result<EccCurve, CryptoError> {
    EccCurve::ALL
        .into_iter()
        .find(|curve| match curve {
            EccCurve::Secp256k1 => secp256k1_ops::owns_public_key(public_key),
            EccCurve::P256 => p256_ops::owns_public_key(public_key),
            EccCurve::P384 => p384_ops::owns_public_key(public_key),
        })
        .ok_or(CryptoError::InvalidPublicKey)
}
