//! Cross-cutting error types for Aula.
//!
//! Transport and session errors live in their own crates. `CoreError` covers
//! failures that the pure domain layer can detect on its own.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Errors raised by domain logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One or more fields failed validation.
    #[error("Error de validación")]
    Validation(FieldErrors),

    /// A status change was attempted that the transition table forbids.
    #[error("Transición de estado no válida: {from} → {to}")]
    InvalidTransition { from: String, to: String },

    /// A string did not match any member of an enumeration.
    #[error("Valor no válido para {field}: {value}")]
    UnknownValue { field: &'static str, value: String },

    /// The acting user is not allowed to perform the operation.
    #[error("{0}")]
    Forbidden(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Field errors attached to a validation failure, if any.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}
