//! # Store Error Types
//!
//! Error types for file-backed store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error        CoreError (pricing, reserve)     │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  StoreError (this module) ← Adds the file path for context             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (console) ← Core errors re-prompt, the rest end the run      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use till_core::{CoreError, ValidationError};

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a data file failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A data file holds malformed JSON.
    #[error("Malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// products.json declares an item that breaks catalog rules.
    #[error("Invalid catalog entry '{item}': {source}")]
    InvalidCatalog {
        item: String,
        #[source]
        source: ValidationError,
    },

    /// A business rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// The business error behind this failure, if any.
    ///
    /// The console uses this to tell "try again" apart from "give up".
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            StoreError::Core(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::ErrorKind;

    #[test]
    fn test_io_error_names_the_file() {
        let err = StoreError::io(
            "/data/orders.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error on /data/orders.json: denied");
        assert!(err.as_core().is_none());
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: StoreError = CoreError::UnknownItem("Pizza".to_string()).into();
        assert_eq!(err.to_string(), "Unknown item: Pizza");
        assert_eq!(err.as_core().map(CoreError::kind), Some(ErrorKind::UnknownItem));
    }
}
