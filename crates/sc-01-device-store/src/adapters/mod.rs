//! # Adapters Layer
//!
//! Concrete `KeyedStore` backends.

pub mod memory;

pub use memory::InMemoryStore;
