// =====================================================================
// File: error.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Dictionary Index Project
// Date: Oct. 6, 2025
//
//! Error types for the dictionary index and its collaborators.
//!
//! - [`IndexError`] : Failures raised by the B+ tree itself.
//! - [`ConfigError`]: Rejected configuration values.
//! - [`Error`]      : Crate-level error wrapping the above plus I/O.
// =====================================================================

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::MIN_ORDER;

/// Convenient Result alias used by the loader, miner and binary.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by [`BPlusTreeIndex`](crate::BPlusTreeIndex) operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The key is not present in the index. Not fatal.
    #[error("key '{0}' not found")]
    NotFound(String),

    /// The arena or a node could not grow to hold the new entry.
    #[error("allocation failed while growing the index: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// A previous insert failed mid-split; the index refuses further writes.
    #[error("index is read-only after an interrupted split")]
    Poisoned,
}

/// Configuration values that fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("order must be at least {min}, got {0}", min = MIN_ORDER)]
    InvalidOrder(usize),

    #[error("minimum support must be at least 1, got {0}")]
    InvalidMinSupport(usize),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading commands or writing responses failed.
    #[error("query loop I/O failed: {0}")]
    Stdio(#[source] std::io::Error),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = IndexError::NotFound("zebra".into());
        assert_eq!(err.to_string(), "key 'zebra' not found");
    }

    #[test]
    fn test_invalid_order_display() {
        let err = ConfigError::InvalidOrder(2);
        assert_eq!(err.to_string(), "order must be at least 3, got 2");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io("words.csv", io_err);

        match &err {
            Error::Io { path, .. } => assert_eq!(path, &PathBuf::from("words.csv")),
            _ => panic!("Expected Io error"),
        }
        assert!(err.to_string().starts_with("could not read 'words.csv'"));
    }

    #[test]
    fn test_stdio_error_has_no_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err = Error::Stdio(io_err);

        assert_eq!(err.to_string(), "query loop I/O failed: closed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_index_error_converts() {
        let err: Error = IndexError::Poisoned.into();
        assert!(matches!(err, Error::Index(IndexError::Poisoned)));
    }
}
