//! Client error types.
//!
//! Every failure that reaches a caller is one [`ApiError`] variant carrying a
//! message that can be shown to staff unchanged.

use aula_auth::AuthError;
use aula_core::errors::CoreError;
use aula_core::validation::FieldErrors;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_MESSAGE: &str = "Ha ocurrido un error";
pub const FORBIDDEN_MESSAGE: &str = "No tiene permisos para realizar esta acción";
pub const VALIDATION_MESSAGE: &str = "Error de validación";
pub const NOT_FOUND_MESSAGE: &str = "Recurso no encontrado";
pub const TIMEOUT_MESSAGE: &str = "La conexión ha excedido el tiempo de espera";
pub const NETWORK_MESSAGE: &str = "Error de conexión con el servidor";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Field errors found locally or reported by the backend.
    #[error("{message}")]
    Validation { message: String, fields: FieldErrors },

    /// No response was received.
    #[error("{0}")]
    Network(String),

    /// The request exceeded its deadline.
    #[error("{0}")]
    Timeout(String),

    /// 401, or no active session.
    #[error("{0}")]
    Auth(String),

    /// 403, or a local permission check failed.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// 409 or a backend `DuplicateError`, e.g. a RUT already on file.
    #[error("{0}")]
    Duplicate(String),

    /// Any other non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A success response whose body did not have the expected shape.
    #[error("respuesta inesperada del servidor: {0}")]
    Decode(String),
}

/// The translated `{message, status, type, details}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub status: Option<u16>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub details: FieldErrors,
}

impl ApiError {
    pub fn validation(fields: FieldErrors) -> Self {
        Self::Validation {
            message: VALIDATION_MESSAGE.to_string(),
            fields,
        }
    }

    /// Stable type tag, matching the backend's error `type` names.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "ValidationError",
            Self::Network(_) => "NetworkError",
            Self::Timeout(_) => "TimeoutError",
            Self::Auth(_) => "AuthError",
            Self::Forbidden(_) => "AuthorizationError",
            Self::NotFound(_) => "NotFoundError",
            Self::Duplicate(_) => "DuplicateError",
            Self::Server { .. } => "ServerError",
            Self::Decode(_) => "DecodeError",
        }
    }

    /// HTTP status implied by the variant, when there is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Auth(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Duplicate(_) => Some(409),
            Self::Server { status, .. } => Some(*status),
            Self::Validation { .. }
            | Self::Network(_)
            | Self::Timeout(_)
            | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub const fn fields(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    #[must_use]
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            message: self.to_string(),
            status: self.status(),
            kind: self.kind(),
            details: self.fields().cloned().unwrap_or_default(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(fields) => Self::validation(fields),
            CoreError::InvalidTransition { .. } => {
                let mut fields = FieldErrors::new();
                fields.set("status", "Transición de estado no válida");
                Self::Validation {
                    message: err.to_string(),
                    fields,
                }
            }
            CoreError::UnknownValue { field, .. } => {
                let message = err.to_string();
                let mut fields = FieldErrors::new();
                fields.set(field, message.clone());
                Self::Validation { message, fields }
            }
            CoreError::Forbidden(message) => Self::Forbidden(message),
            CoreError::Other(other) => Self::Decode(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => Self::Auth("No hay una sesión activa".to_string()),
            other => Self::Auth(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
