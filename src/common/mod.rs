//! Common types and utilities shared across the crate.
//!
//! Holds the unified error type, XML text helpers and log setup.

// Submodule declarations
pub mod error;
pub mod telemetry;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result, StorageOp};
