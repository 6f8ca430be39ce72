//! # Algorithm Suites
//!
//! `AlgorithmSuite` is the closed, tagged set of signer/key-generator pairs.
//! `SuiteRegistry` is the constructor table keyed by `SignatureAlgorithm`:
//! resolving an algorithm that was not registered fails with
//! `CryptoError::UnsupportedAlgorithm`, both when a device is created and
//! when it later signs.

use crate::ecc::EccSuite;
use crate::params::KeyParameters;
use crate::rsa_pkcs1::RsaSuite;
use crate::CryptoError;
use shared_types::{PrivateKeyBytes, SignatureAlgorithm};
use std::collections::BTreeMap;
use std::fmt;

/// Freshly generated, encoded key pair.
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// Encoded private key (zeroized on drop)
    pub private_key: PrivateKeyBytes,
    /// Encoded public key
    pub public_key: Vec<u8>,
}

impl KeyPair {
    /// Wrap encoded key bytes.
    pub fn new(private_key: Vec<u8>, public_key: Vec<u8>) -> Self {
        Self {
            private_key: PrivateKeyBytes::new(private_key),
            public_key,
        }
    }
}

/// Algorithm-specific key generation, signing and verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmSuite {
    /// RSA PKCS#1 v1.5 / SHA-256
    Rsa(RsaSuite),
    /// ECDSA / SHA-256
    Ecc(EccSuite),
}

impl AlgorithmSuite {
    /// Algorithm implemented by this suite.
    pub fn algorithm(&self) -> SignatureAlgorithm {
        match self {
            AlgorithmSuite::Rsa(_) => SignatureAlgorithm::Rsa,
            AlgorithmSuite::Ecc(_) => SignatureAlgorithm::Ecc,
        }
    }

    /// Generate a fresh key pair.
    pub fn generate(&self) -> Result<KeyPair, CryptoError> {
        match self {
            AlgorithmSuite::Rsa(suite) => suite.generate(),
            AlgorithmSuite::Ecc(suite) => suite.generate(),
        }
    }

    /// Hash `message` with SHA-256 and sign the digest.
    pub fn sign(&self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            AlgorithmSuite::Rsa(suite) => suite.sign(private_key, message),
            AlgorithmSuite::Ecc(suite) => suite.sign(private_key, message),
        }
    }

    /// Verify `signature` over `message`.
    pub fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        match self {
            AlgorithmSuite::Rsa(suite) => suite.verify(public_key, message, signature),
            AlgorithmSuite::Ecc(suite) => suite.verify(public_key, message, signature),
        }
    }
}

type SuiteConstructor = fn(&KeyParameters) -> AlgorithmSuite;

fn rsa_suite(params: &KeyParameters) -> AlgorithmSuite {
    AlgorithmSuite::Rsa(RsaSuite::new(params.rsa_bits()))
}

fn ecc_suite(params: &KeyParameters) -> AlgorithmSuite {
    AlgorithmSuite::Ecc(EccSuite::new(params.ecc_curve()))
}

fn constructor_for(algorithm: SignatureAlgorithm) -> SuiteConstructor {
    match algorithm {
        SignatureAlgorithm::Rsa => rsa_suite,
        SignatureAlgorithm::Ecc => ecc_suite,
    }
}

/// Registered-constructor table mapping algorithms to suites.
#[derive(Clone)]
pub struct SuiteRegistry {
    params: KeyParameters,
    constructors: BTreeMap<SignatureAlgorithm, SuiteConstructor>,
}

impl fmt::Debug for SuiteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteRegistry")
            .field("params", &self.params)
            .field("algorithms", &self.algorithms())
            .finish()
    }
}

impl SuiteRegistry {
    /// Registry with every algorithm enabled.
    pub fn new(params: KeyParameters) -> Self {
        Self::with_algorithms(params, &SignatureAlgorithm::ALL)
    }

    /// Registry with only `algorithms` enabled.
    pub fn with_algorithms(params: KeyParameters, algorithms: &[SignatureAlgorithm]) -> Self {
        let constructors = algorithms
            .iter()
            .map(|alg| (*alg, constructor_for(*alg)))
            .collect();
        Self {
            params,
            constructors,
        }
    }

    /// Resolve the suite for `algorithm`.
    pub fn resolve(&self, algorithm: SignatureAlgorithm) -> Result<AlgorithmSuite, CryptoError> {
        self.constructors
            .get(&algorithm)
            .map(|construct| construct(&self.params))
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(algorithm.to_string()))
    }

    /// Whether `algorithm` is registered.
    pub fn is_enabled(&self, algorithm: SignatureAlgorithm) -> bool {
        self.constructors.contains_key(&algorithm)
    }

    /// Registered algorithms in stable order.
    pub fn algorithms(&self) -> Vec<SignatureAlgorithm> {
        self.constructors.keys().copied().collect()
    }

    /// Parameters handed to every constructor.
    pub fn parameters(&self) -> &KeyParameters {
        &self.params
    }
}
