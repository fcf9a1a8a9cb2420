use std::path::PathBuf;

use thiserror::Error;

use crate::lock::LockMode;

#[derive(Debug, Error)]
pub enum OperationStoreError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to take {mode} lock on {path}: {source}")]
    Lock {
        mode: LockMode,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("operation name {name:?} cannot be stored: {reason}")]
    InvalidName { name: String, reason: &'static str },
}

impl OperationStoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn lock(mode: LockMode, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Lock {
            mode,
            path: path.into(),
            source,
        }
    }
}
