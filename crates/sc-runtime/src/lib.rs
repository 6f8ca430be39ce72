//! # Sigchain Runtime
//!
//! Wiring and boundary for the signature device service.
//!
//! ## Modular Structure
//!
//! - `container/` - Environment configuration and dependency injection
//! - `dto` - Wire shapes and response envelopes
//! - `commands` - Line command parsing and dispatch onto `SignatureDeviceApi`
//!
//! ## Startup Sequence
//!
//! 1. Load `ServiceConfig` from the environment
//! 2. Install logging and register metrics
//! 3. Validate the configuration for production use
//! 4. Build the `ServiceContainer`
//! 5. Serve stdin until `quit` or end of input

pub mod commands;
pub mod container;
pub mod dto;

pub use commands::{Command, CommandError, Dispatcher, Reply};
pub use container::{ConfigError, ServiceConfig, ServiceContainer};
