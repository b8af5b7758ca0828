use super::{FieldErrors, Mode, is_valid_email};
use crate::drafts::UserDraft;
use crate::enums::Role;
use crate::limits::{PASSWORD_MIN, char_len};
use crate::rut;

/// Validate a staff account form.
///
/// Blank values are always rejected. Missing values are only rejected on
/// [`Mode::Create`], where a password is also required.
#[must_use]
pub fn validate_user(draft: &UserDraft, mode: Mode) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let mut required = vec![
        ("firstName", draft.first_name.as_deref()),
        ("lastName", draft.last_name.as_deref()),
        ("email", draft.email.as_deref()),
        ("rut", draft.rut.as_deref()),
        ("role", draft.role.as_deref()),
    ];
    if mode == Mode::Create {
        required.push(("password", draft.password.as_deref()));
    }
    for (field, value) in required {
        match value {
            Some(v) if v.trim().is_empty() => {
                errors.set(field, format!("El campo {field} no puede estar vacío"));
            }
            None if mode == Mode::Create => {
                errors.set(field, format!("El campo {field} es requerido"));
            }
            _ => {}
        }
    }

    if let Some(email) = draft.email.as_deref().filter(|e| !e.trim().is_empty())
        && !is_valid_email(email.trim())
    {
        errors.set("email", "El formato del email no es válido");
    }

    if let Some(raw) = draft.rut.as_deref().filter(|r| !r.trim().is_empty())
        && !rut::is_valid(raw)
    {
        errors.set("rut", "El formato del RUT no es válido");
    }

    if let Some(role) = draft.role.as_deref().filter(|r| !r.trim().is_empty())
        && role.parse::<Role>().is_err()
    {
        errors.set("role", "El rol especificado no es válido");
    }

    if let Some(password) = draft.password.as_deref().filter(|p| !p.is_empty())
        && char_len(password) < PASSWORD_MIN
    {
        errors.set(
            "password",
            format!("La contraseña debe tener al menos {PASSWORD_MIN} caracteres"),
        );
    }

    errors
}
