use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::{FieldErrors, Mode, exceeds, is_filled, is_valid_email, is_valid_phone};
use crate::drafts::StudentDraft;
use crate::enums::{StudentType, is_known_grade};
use crate::limits::student as limits;
use crate::rut;

/// Whole years between `birth` and `today`.
fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Validate a student form.
///
/// On [`Mode::Create`] names, RUT, birth date, grade, and academic year are
/// required. On [`Mode::Update`] only the fields present are checked.
#[must_use]
pub fn validate_student(draft: &StudentDraft, mode: Mode, now: DateTime<Utc>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let today = now.date_naive();

    if mode == Mode::Create {
        for (field, filled, message) in [
            ("firstName", is_filled(draft.first_name.as_deref()), "El nombre es requerido"),
            ("lastName", is_filled(draft.last_name.as_deref()), "El apellido es requerido"),
            ("rut", is_filled(draft.rut.as_deref()), "El RUT es requerido"),
            ("birthDate", draft.birth_date.is_some(), "La fecha de nacimiento es requerida"),
            ("grade", is_filled(draft.grade.as_deref()), "El curso es requerido"),
            ("academicYear", draft.academic_year.is_some(), "El año académico es requerido"),
        ] {
            if !filled {
                errors.set(field, message);
            }
        }
    }

    if let Some(raw) = draft.rut.as_deref().filter(|r| !r.trim().is_empty()) {
        if !rut::has_valid_shape(raw) {
            errors.set("rut", "Formato de RUT inválido (ej: 12345678-9)");
        } else if !rut::is_valid(raw) {
            errors.set("rut", "RUT inválido (dígito verificador incorrecto)");
        }
    }

    if let Some(birth) = draft.birth_date {
        if birth > today {
            errors.set("birthDate", "La fecha de nacimiento no puede ser futura");
        } else {
            let age = age_on(birth, today);
            if !(limits::MIN_AGE..=limits::MAX_AGE).contains(&age) {
                errors.set(
                    "birthDate",
                    format!(
                        "La edad debe estar entre {} y {} años",
                        limits::MIN_AGE,
                        limits::MAX_AGE
                    ),
                );
            }
        }
    }

    if let Some(email) = draft.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
        && !is_valid_email(email)
    {
        errors.set("email", "El formato del email no es válido");
    }

    if let Some(grade) = draft.grade.as_deref().filter(|g| !g.trim().is_empty())
        && !is_known_grade(grade)
    {
        errors.set("grade", "Curso no válido");
    }

    if let Some(kind) = draft.student_type.as_deref()
        && kind.parse::<StudentType>().is_err()
    {
        errors.set("studentType", "Tipo de estudiante no válido");
    }

    if let Some(year) = draft.academic_year {
        let current = today.year();
        if year < current - 1 || year > current + 1 {
            errors.set(
                "academicYear",
                "El año académico debe estar entre el año anterior y el próximo año",
            );
        }
    }

    for (field, contact) in [
        ("guardian1Contact", &draft.guardian1_contact),
        ("guardian2Contact", &draft.guardian2_contact),
    ] {
        if let Some(contact) = contact.as_deref().filter(|c| !c.trim().is_empty())
            && !is_valid_phone(contact)
        {
            errors.set(
                field,
                "Formato de contacto inválido (solo números y + inicial)",
            );
        }
    }

    for (field, value, max) in [
        ("firstName", &draft.first_name, limits::NAME),
        ("lastName", &draft.last_name, limits::NAME),
        ("email", &draft.email, limits::EMAIL),
        ("guardian1Name", &draft.guardian1_name, limits::GUARDIAN_NAME),
        ("guardian2Name", &draft.guardian2_name, limits::GUARDIAN_NAME),
        ("guardian1Contact", &draft.guardian1_contact, limits::GUARDIAN_CONTACT),
        ("guardian2Contact", &draft.guardian2_contact, limits::GUARDIAN_CONTACT),
        ("address", &draft.address, limits::ADDRESS),
        ("healthInfo", &draft.health_info, limits::HEALTH_INFO),
        ("medicalConditions", &draft.medical_conditions, limits::MEDICAL_CONDITIONS),
        ("allergies", &draft.allergies, limits::ALLERGIES),
        ("scholarshipDetails", &draft.scholarship_details, limits::SCHOLARSHIP_DETAILS),
    ] {
        if exceeds(value.as_deref(), max) {
            errors.set(field, format!("Este campo no puede exceder los {max} caracteres"));
        }
    }

    errors
}
