//! Error types shared by the registries.

use thiserror::Error;

/// Registry-level errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("record not found")]
    NotFound,

    #[error("email already registered")]
    DuplicateEmail,

    #[error("capacity reached")]
    CapacityReached,
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
