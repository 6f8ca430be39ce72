//! # Sigchain Telemetry
//!
//! Logging and metrics shared by every Sigchain crate.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with an `EnvFilter`, plain or JSON output
//! - **Metrics**: Prometheus counters and histograms in a process-wide registry
//!
//! Library crates only emit `tracing` events and record metrics. Installing the
//! subscriber is left to binaries, through [`init_logging`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sc_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config)?;
//!     // ...
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SC_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `SC_JSON_LOGS` | `false` | Emit JSON lines instead of plain text |
//! | `SC_SERVICE_NAME` | `sigchain` | Service name attached to startup logs |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{gather_text, register_metrics, SignOutcome};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The subscriber could not be installed (bad filter, or one already set)
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}
