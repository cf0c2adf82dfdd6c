//! Application error types

use fincheck_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A response body could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// An expected JSON field was absent.
    #[error("missing field: {0}")]
    MissingField(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
