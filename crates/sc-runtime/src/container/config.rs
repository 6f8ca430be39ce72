//! # Service Configuration
//!
//! Runtime parameters read from the environment.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SC_RSA_KEY_BITS` | `2048` | RSA modulus size for new devices |
//! | `SC_ECC_CURVE` | `secp256k1` | Curve for new ECC devices (`secp256k1`, `p256`, `p384`) |
//! | `SC_ALGORITHMS` | `RSA,ECC` | Comma-separated enabled algorithms |
//! | `SC_LOCK_TIMEOUT_MS` | unset | Bounded device lease wait; unset waits forever |
//!
//! ## Security Requirements
//!
//! - RSA keys below 2048 bits are rejected by `validate_for_production`
//! - At least one algorithm must be enabled

use sc_02_signature_chain::{ChainConfig, LockWait};
use sc_telemetry::TelemetryConfig;
use shared_crypto::{CryptoError, EccCurve, KeyParameters};
use shared_types::SignatureAlgorithm;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Smallest RSA modulus accepted in production.
pub const MIN_PRODUCTION_RSA_BITS: usize = 2048;

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// RSA modulus size for new devices.
    pub rsa_key_bits: usize,
    /// Curve for new ECC devices.
    pub ecc_curve: EccCurve,
    /// Algorithms devices may be created with.
    pub algorithms: Vec<SignatureAlgorithm>,
    /// Bounded lease wait, or `None` to wait forever.
    pub lock_timeout: Option<Duration>,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            rsa_key_bits: MIN_PRODUCTION_RSA_BITS,
            ecc_curve: EccCurve::Secp256k1,
            algorithms: SignatureAlgorithm::ALL.to_vec(),
            lock_timeout: None,
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(raw) = lookup("SC_RSA_KEY_BITS") {
            config.rsa_key_bits = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("SC_RSA_KEY_BITS", &raw, "expected an integer"))?;
        }

        if let Some(raw) = lookup("SC_ECC_CURVE") {
            config.ecc_curve = raw
                .parse()
                .map_err(|e: CryptoError| ConfigError::invalid("SC_ECC_CURVE", &raw, &e.to_string()))?;
        }

        if let Some(raw) = lookup("SC_ALGORITHMS") {
            config.algorithms = parse_algorithms(&raw)?;
        }

        if let Some(raw) = lookup("SC_LOCK_TIMEOUT_MS") {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                ConfigError::invalid("SC_LOCK_TIMEOUT_MS", &raw, "expected milliseconds")
            })?;
            config.lock_timeout = Some(Duration::from_millis(millis));
        }

        Ok(config)
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the RSA modulus is below 2048 bits
    /// - no algorithm is enabled
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.algorithms.contains(&SignatureAlgorithm::Rsa)
            && self.rsa_key_bits < MIN_PRODUCTION_RSA_BITS
        {
            return Err(ConfigError::WeakRsaKey(self.rsa_key_bits));
        }
        if self.algorithms.is_empty() {
            return Err(ConfigError::NoAlgorithms);
        }
        Ok(())
    }

    /// Lease wait policy derived from `lock_timeout`.
    pub fn lock_wait(&self) -> LockWait {
        self.lock_timeout
            .map(LockWait::Bounded)
            .unwrap_or(LockWait::Unbounded)
    }

    /// Engine configuration.
    pub fn chain_config(&self) -> Result<ChainConfig, ConfigError> {
        let params = KeyParameters::new(self.rsa_key_bits, self.ecc_curve)
            .map_err(ConfigError::KeyParameters)?;

        Ok(ChainConfig::new(params)
            .with_algorithms(&self.algorithms)
            .with_lock_wait(self.lock_wait()))
    }
}

fn parse_algorithms(raw: &str) -> Result<Vec<SignatureAlgorithm>, ConfigError> {
    let mut algorithms = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let algorithm: SignatureAlgorithm = name
            .parse()
            .map_err(|_| ConfigError::invalid("SC_ALGORITHMS", raw, "unknown algorithm"))?;
        if !algorithms.contains(&algorithm) {
            algorithms.push(algorithm);
        }
    }
    Ok(algorithms)
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("Invalid value {value:?} for {variable}: {reason}")]
    InvalidValue {
        variable: &'static str,
        value: String,
        reason: String,
    },

    /// RSA modulus too small for production.
    #[error("RSA key size {0} is below the production minimum of 2048 bits")]
    WeakRsaKey(usize),

    /// No algorithm enabled.
    #[error("No signature algorithm enabled. Set SC_ALGORITHMS to RSA, ECC or both.")]
    NoAlgorithms,

    /// Key parameters rejected by the crypto layer.
    #[error("Invalid key parameters: {0}")]
    KeyParameters(CryptoError),
}

impl ConfigError {
    fn invalid(variable: &'static str, value: &str, reason: &str) -> Self {
        ConfigError::InvalidValue {
            variable,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
