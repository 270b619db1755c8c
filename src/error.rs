//! Error types shared by the contour, catalog and query modules.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while building a catalog, encoding a query or ranking.
#[derive(Debug, Error)]
pub enum HumError {
    /// A pitch that is not a positive, finite number reached the threshold encoder.
    #[error("invalid pitch {value} at note {index}")]
    InvalidPitch { index: usize, value: f64 },

    /// A reference melody, a query recording or the catalog directory could not be read.
    #[error("failed to read {}: {reason}", .path.display())]
    SourceReadError { path: PathBuf, reason: String },

    /// The catalog has no entries. Reported as a warning, ranking still succeeds.
    #[error("the melody catalog is empty")]
    EmptyCatalog,

    /// A catalog entry with the same identifier already exists.
    #[error("duplicate melody identifier {0:?}")]
    DuplicateId(String),

    /// A character outside of `*`, `U`, `D` and `S` in a contour string.
    #[error("invalid contour symbol {0:?}")]
    InvalidSymbol(char),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HumError {
    pub(crate) fn source_read(path: &Path, reason: impl ToString) -> Self {
        HumError::SourceReadError {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HumError>;
