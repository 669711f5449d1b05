//! Domain error model.

use thiserror::Error;

use crate::field_errors::FieldErrors;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// missing records, identity conflicts). Rendering these for a user is the
/// caller's job.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A candidate record failed validation; carries every field-level violation.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// No record with the given identifier exists.
    #[error("not found: {0}")]
    NotFound(String),

    /// A record with the given identifier already exists.
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// The identifier embedded in a replacement record differs from the key
    /// used to locate the stored record.
    #[error("id mismatch (expected: {expected}, found: {found})")]
    IdMismatch { expected: String, found: String },

    /// The backing store cannot serve requests (e.g. a poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl DomainError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn id_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::IdMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Field-level violations, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}
