//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic business failures only (validation, invariants, conflicts).
/// Module crates keep their own precise error enums and convert into this one
/// at their boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. missing customer details).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. lifecycle step out of order).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. capacity exhausted, step already taken).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Whether this error describes bad input rather than bad sequencing.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidId(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = DomainError::validation("customer is required");
        assert_eq!(err.to_string(), "validation failed: customer is required");

        let err = DomainError::invariant("order was never received");
        assert_eq!(err.to_string(), "invariant violated: order was never received");
    }

    #[test]
    fn validation_classification() {
        assert!(DomainError::validation("x").is_validation());
        assert!(DomainError::invalid_id("x").is_validation());
        assert!(!DomainError::conflict("x").is_validation());
        assert!(!DomainError::not_found().is_validation());
    }
}
