//! # Domain Layer
//!
//! Store errors and the lease types handed out by `KeyedStore::acquire`.

pub mod errors;
pub mod lease;
