//! Response and transport-failure translation.
//!
//! Centralizes status-code handling so the client and services only deal in
//! [`ApiError`] variants. The backend reports failures as
//! `{ "error": string, "type"?: string, "details"?: object }`.

use serde::Deserialize;
use serde_json::Value;

use crate::endpoints;
use crate::error::{
    ApiError, DEFAULT_MESSAGE, FORBIDDEN_MESSAGE, NETWORK_MESSAGE, NOT_FOUND_MESSAGE,
    TIMEOUT_MESSAGE, VALIDATION_MESSAGE,
};
use aula_core::validation::FieldErrors;

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    details: Option<Value>,
}

/// Read a response body as JSON, translating non-success statuses.
///
/// An empty success body yields `Value::Null`.
pub async fn check_response(resp: reqwest::Response) -> Result<Value, ApiError> {
    let status = resp.status();
    let body = resp.bytes().await.map_err(|e| translate_transport(&e))?;
    if !status.is_success() {
        return Err(translate_status(status.as_u16(), &body));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&body).map_err(ApiError::from)
}

/// Map a non-success status and its body to an [`ApiError`].
#[must_use]
pub fn translate_status(status: u16, body: &[u8]) -> ApiError {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).unwrap_or_default();
    let message = envelope
        .error
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
    let kind = envelope.kind.as_deref();

    let err = if status == 401 {
        ApiError::Auth(message)
    } else if kind == Some("ValidationError") {
        ApiError::Validation {
            message: VALIDATION_MESSAGE.to_string(),
            fields: field_errors(envelope.details),
        }
    } else if status == 403 {
        ApiError::Forbidden(FORBIDDEN_MESSAGE.to_string())
    } else if status == 404 {
        ApiError::NotFound(NOT_FOUND_MESSAGE.to_string())
    } else if status == 409 || kind == Some("DuplicateError") {
        ApiError::Duplicate(message)
    } else {
        ApiError::Server { status, message }
    };
    tracing::warn!(status, kind = err.kind(), %err, "request failed");
    err
}

/// Map a failure that produced no response.
#[must_use]
pub fn translate_transport(err: &reqwest::Error) -> ApiError {
    tracing::warn!(error = %err, "no response from backend");
    if err.is_timeout() {
        ApiError::Timeout(TIMEOUT_MESSAGE.to_string())
    } else {
        ApiError::Network(NETWORK_MESSAGE.to_string())
    }
}

/// A 401 ends the session, except for a failed login attempt.
#[must_use]
pub fn should_clear_session(err: &ApiError, path: &str) -> bool {
    matches!(err, ApiError::Auth(_)) && path != endpoints::LOGIN
}

/// Flatten backend `details` into field errors.
///
/// Accepts `{field: message}` (message may be a string or a list of strings)
/// and `[{field|path, message}]`.
fn field_errors(details: Option<Value>) -> FieldErrors {
    let mut fields = FieldErrors::new();
    match details {
        Some(Value::Object(map)) => {
            for (field, value) in map {
                fields.set(field, message_text(&value));
            }
        }
        Some(Value::Array(items)) => {
            for item in items {
                let field = item
                    .get("field")
                    .or_else(|| item.get("path"))
                    .and_then(Value::as_str);
                let message = item.get("message").map(message_text);
                if let (Some(field), Some(message)) = (field, message) {
                    fields.set(field, message);
                }
            }
        }
        _ => {}
    }
    fields
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .map(message_text)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
