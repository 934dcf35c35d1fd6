//! Unified error type surfaced by the services.
//!
//! Wraps validation failures, lookup misses, and storage errors so embedders
//! can bubble them up with consistent context.

use thiserror::Error;

pub use makerspace_store::StoreError;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("id already registered: {0}")]
    DuplicateId(String),

    #[error("user {0} is not a client")]
    NotAClient(String),

    #[error("could not find a free id after {attempts} attempts")]
    IdExhausted { attempts: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
