//! # Key Parameters
//!
//! Security parameters (RSA modulus size, ECC curve) are injected by the
//! caller. This crate provides no `Default` for them; the runtime
//! configuration layer owns the deployment defaults.

use crate::CryptoError;
use std::fmt;
use std::str::FromStr;

/// Smallest RSA modulus accepted by `KeyParameters::new`.
pub const MIN_RSA_BITS: usize = 1024;

/// Largest RSA modulus accepted by `KeyParameters::new`.
pub const MAX_RSA_BITS: usize = 8192;

/// Named curves available to the ECC suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EccCurve {
    /// secp256k1 (Koblitz)
    Secp256k1,
    /// NIST P-256 / prime256v1
    P256,
    /// NIST P-384 / secp384r1
    P384,
}

impl EccCurve {
    /// Every supported curve, in detection order.
    pub const ALL: [EccCurve; 3] = [EccCurve::Secp256k1, EccCurve::P256, EccCurve::P384];

    /// Canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EccCurve::Secp256k1 => "secp256k1",
            EccCurve::P256 => "p256",
            EccCurve::P384 => "p384",
        }
    }
}

impl fmt::Display for EccCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EccCurve {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "secp256k1" | "k256" => Ok(EccCurve::Secp256k1),
            "p256" | "p-256" | "prime256v1" | "secp256r1" => Ok(EccCurve::P256),
            "p384" | "p-384" | "secp384r1" => Ok(EccCurve::P384),
            _ => Err(CryptoError::UnsupportedAlgorithm(format!("curve {}", s))),
        }
    }
}

/// Validated key-generation parameters shared by all suites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyParameters {
    rsa_bits: usize,
    ecc_curve: EccCurve,
}

impl KeyParameters {
    /// Create parameters, rejecting RSA sizes outside
    /// `MIN_RSA_BITS..=MAX_RSA_BITS` or not a multiple of 8.
    pub fn new(rsa_bits: usize, ecc_curve: EccCurve) -> Result<Self, CryptoError> {
        if !(MIN_RSA_BITS..=MAX_RSA_BITS).contains(&rsa_bits) || rsa_bits % 8 != 0 {
            return Err(CryptoError::InvalidKeyParameters(format!(
                "RSA modulus of {} bits (allowed {}..={}, multiple of 8)",
                rsa_bits, MIN_RSA_BITS, MAX_RSA_BITS
            )));
        }
        Ok(Self {
            rsa_bits,
            ecc_curve,
        })
    }

    /// RSA modulus size in bits.
    pub fn rsa_bits(&self) -> usize {
        self.rsa_bits
    }

    /// Curve used for newly generated ECC keys.
    pub fn ecc_curve(&self) -> EccCurve {
        self.ecc_curve
    }
}
