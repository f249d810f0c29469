//! Unified error types for transferdoc.
//!
//! This module provides a unified error type that encompasses discovery,
//! configuration and document storage failures.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result, StorageOp};
