//! Field validation for form input.
//!
//! Validators never fail: they return a [`FieldErrors`] map from field name
//! (the backend's camelCase key) to a user-facing message. An empty map means
//! the input is valid. Messages are Spanish because they are shown to staff
//! as-is.
//!
//! "Now" is always an argument so results are reproducible.

mod intervention;
mod student;
mod user;

pub use intervention::{validate_comment, validate_intervention};
pub use student::validate_student;
pub use user::validate_user;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::CoreError;
use crate::limits::char_len;

/// Whether the record is being created or updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Field name → error message. Ordered so output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`, replacing any earlier message.
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, otherwise a [`CoreError::Validation`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` carrying `self` if any field failed.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A present value that is not blank after trimming.
fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn exceeds(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|v| char_len(v) > max)
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, and a dot
/// inside the domain with text on both sides.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let last = domain.len().saturating_sub(1);
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < last)
}

/// Optional leading `+` then 9 to 15 digits, ignoring whitespace.
#[must_use]
pub fn is_valid_phone(contact: &str) -> bool {
    let compact: String = contact.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    (9..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("ana@colegio.cl", true)]
    #[case("a.b+c@sub.dominio.org", true)]
    #[case("ana@colegio", false)]
    #[case("ana@.cl", false)]
    #[case("ana@colegio.", false)]
    #[case("@colegio.cl", false)]
    #[case("ana @colegio.cl", false)]
    #[case("ana@@colegio.cl", false)]
    fn email_shape(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[rstest]
    #[case("+56912345678", true)]
    #[case("9 1234 5678", true)]
    #[case("12345678", false)]
    #[case("+56-9-1234-5678", false)]
    #[case("1234567890123456", false)]
    fn phone_shape(#[case] contact: &str, #[case] expected: bool) {
        assert_eq!(is_valid_phone(contact), expected);
    }

    #[test]
    fn later_message_replaces_earlier() {
        let mut errors = FieldErrors::new();
        errors.set("title", "El campo title es requerido");
        errors.set("title", "El título no puede exceder 100 caracteres");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("title"),
            Some("El título no puede exceder 100 caracteres")
        );
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut errors = FieldErrors::new();
        errors.set("rut", "RUT inválido");
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"rut":"RUT inválido"}"#
        );
    }

    #[test]
    fn into_result_wraps_non_empty() {
        assert!(FieldErrors::new().into_result().is_ok());
        let mut errors = FieldErrors::new();
        errors.set("content", "El contenido es requerido");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.field_errors().map(FieldErrors::len), Some(1));
    }
}
