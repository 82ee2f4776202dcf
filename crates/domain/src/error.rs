//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required credential field is empty.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// The provided URL is invalid or cannot carry a path.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// An identifier (realm, client id) is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A token endpoint response cannot be turned into a usable token.
    #[error("invalid token response: {0}")]
    InvalidTokenResponse(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
