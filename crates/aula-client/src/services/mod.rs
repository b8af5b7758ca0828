//! Orchestration over the backend: local validation before every write,
//! record post-processing after every read.

mod auth;
mod interventions;
mod students;
mod users;

pub use auth::AuthService;
pub use interventions::InterventionService;
pub use students::StudentService;
pub use users::UserService;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(ApiError::from)
}

/// List endpoints answer either a bare array or `{ "data": [...] }`.
/// Anything else is an empty list.
pub(crate) fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    match value {
        Value::Array(_) => decode(value),
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Array(_)) => decode(data),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}
