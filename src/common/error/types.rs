//! Unified error type for transferdoc.
//!
//! Layer errors from the packaging code (`OpcError`, `OoxmlError`) are folded
//! into this type so callers only ever match on one enum.
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::ooxml::error::OoxmlError;

/// Which side of document storage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Load,
    Save,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageOp::Load => f.write_str("load"),
            StorageOp::Save => f.write_str("save"),
        }
    }
}

/// Main error type for transferdoc operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No input document matches the discovery pattern
    #[error("no document matching '{pattern}' found in {}", dir.display())]
    NotFound { dir: PathBuf, pattern: String },

    /// The document storage layer failed to parse the input or write the output
    #[error("failed to {op} document {}: {cause}", path.display())]
    LoadOrSave {
        op: StorageOp,
        path: PathBuf,
        #[source]
        cause: OoxmlError,
    },

    /// The derived output path points at the input document
    #[error("output path {} is the input document; refusing to overwrite it", .0.display())]
    WouldOverwriteInput(PathBuf),

    /// A replacement entry cannot be used
    #[error("invalid replacement: {0}")]
    InvalidReplacement(String),

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for transferdoc operations.
pub type Result<T> = std::result::Result<T, Error>;
