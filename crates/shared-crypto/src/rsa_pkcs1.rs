//! # RSA Signatures (PKCS#1 v1.5)
//!
//! Keys are exchanged as PKCS#1 DER (`RSAPrivateKey` / `RSAPublicKey`).
//! Signing uses PKCS#1 v1.5 padding over the SHA-256 digest, with RSA
//! blinding drawn from the thread RNG.

use crate::hashing::sha256;
use crate::suite::KeyPair;
use crate::CryptoError;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

/// RSA key generator and signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RsaSuite {
    bits: usize,
}

impl RsaSuite {
    /// Create a suite generating keys with a `bits`-bit modulus.
    pub fn new(bits: usize) -> Self {
        Self { bits }
    }

    /// Modulus size of generated keys.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Generate a fresh key pair.
    pub fn generate(&self) -> Result<KeyPair, CryptoError> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, self.bits)
            .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;

        let private_der = private_key
            .to_pkcs1_der()
            .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
        let public_der = private_key
            .to_public_key()
            .to_pkcs1_der()
            .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;

        Ok(KeyPair::new(
            private_der.as_bytes().to_vec(),
            public_der.as_bytes().to_vec(),
        ))
    }

    /// Sign `message` with a PKCS#1 DER private key.
    pub fn sign(&self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let key = RsaPrivateKey::from_pkcs1_der(private_key)
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;

        let digest = sha256(message);
        key.sign_with_rng(&mut rand::thread_rng(), Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))
    }

    /// Verify `signature` over `message` with a PKCS#1 DER public key.
    pub fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        let key =
            RsaPublicKey::from_pkcs1_der(public_key).map_err(|_| CryptoError::InvalidPublicKey)?;

        let digest = sha256(message);
        key.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}
