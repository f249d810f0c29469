//! Conversions into [`Error`].
//!
//! Storage failures keep the path and the operation they belong to, so they
//! go through [`Error::storage`] rather than a blanket `From` impl.

use std::path::PathBuf;

use super::types::{Error, StorageOp};
use crate::ooxml::error::OoxmlError;

impl Error {
    /// Wrap a storage-layer failure with the path and operation it belongs to.
    pub fn storage(op: StorageOp, path: impl Into<PathBuf>, cause: impl Into<OoxmlError>) -> Self {
        Error::LoadOrSave {
            op,
            path: path.into(),
            cause: cause.into(),
        }
    }
}
