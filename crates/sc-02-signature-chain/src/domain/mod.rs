//! # Domain Layer
//!
//! Device entities, the pure chain rules, and error types. No I/O.

pub mod chain;
pub mod entities;
pub mod errors;
