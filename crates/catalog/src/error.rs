//! Catalog errors

use bookshelf_validator::form::RuleError;
use std::path::PathBuf;

/// Failure of a catalog operation.
///
/// Field-level validation failures are not errors; they come back as a
/// rejected save.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A validated record still holds a value the entity cannot store.
    #[error("field `{key}`: {reason}")]
    InvalidField {
        /// Record key.
        key: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// A row index does not exist.
    #[error("no row at index {index} (catalog has {len})")]
    RowOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of rows.
        len: usize,
    },

    /// The entity layout does not match its dialog controls.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Catalog JSON could not be encoded or decoded.
    #[error("catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file could not be read or written.
    #[error("catalog file {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl CatalogError {
    pub(crate) fn invalid_field(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
