//! Error types raised by the storage layer.

use thiserror::Error;

/// Errors surfaced by line stores and repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to rewrite {path}: {source}")]
    Rewrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
