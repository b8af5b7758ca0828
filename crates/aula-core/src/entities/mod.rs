//! Entity structs for Aula domain records.
//!
//! Field names follow the backend's camelCase JSON. Deserialization is
//! lenient about nulls and date shapes because rows written by older
//! versions of the backend are still in circulation.

mod comment;
mod intervention;
mod student;
mod user;

pub use comment::{Comment, CommentRecord};
pub use intervention::{Intervention, InterventionDetails, InterventionRecord};
pub use student::{Student, StudentRecord, StudentSummary};
pub use user::{User, UserRecord, UserSummary};

use serde::{Deserialize, Deserializer};

/// Backend primary keys are integers.
pub type RecordId = i64;

/// Full display name from first and last names.
#[must_use]
pub fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
