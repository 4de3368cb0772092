//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, per-request failures (bad input,
/// bad credentials, missing rows, ownership violations). Infrastructure
/// concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation; the message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// Credentials did not check out; the message is user-facing.
    #[error("{0}")]
    Auth(String),

    /// A requested resource does not exist.
    #[error("not found")]
    NotFound,

    /// The actor is not the owner of the resource.
    #[error("forbidden")]
    Forbidden,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }
}
