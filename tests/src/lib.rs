//! # Sigchain Test Suite
//!
//! Cross-subsystem tests for the device store, the signature chain and the
//! command driver.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion signing throughput
//! └── src/integration/
//!     ├── chain_flows.rs   # Create, sign, replay, tamper
//!     ├── concurrency.rs   # Contended and parallel signing
//!     └── driver.rs        # Line protocol end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sc-tests
//!
//! # By module
//! cargo test -p sc-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p sc-tests
//! ```

#![allow(dead_code)]

pub mod integration;
