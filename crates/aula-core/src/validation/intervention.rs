use chrono::{DateTime, Utc};

use super::{FieldErrors, Mode, exceeds, is_filled};
use crate::drafts::{CommentDraft, InterventionDraft};
use crate::enums::{InterventionScope, InterventionStatus, InterventionType, Priority};
use crate::limits::{self, char_len};

fn required(field: &str) -> String {
    format!("El campo {field} es requerido")
}

/// Validate an intervention form.
///
/// On [`Mode::Create`] `studentId` and `responsibleId` are required in
/// addition to `title`, `description`, `type`, and `priority`. On
/// [`Mode::Update`] a `status` is checked against the transition table when
/// `currentStatus` is supplied.
#[must_use]
pub fn validate_intervention(
    draft: &InterventionDraft,
    mode: Mode,
    now: DateTime<Utc>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for (field, filled) in [
        ("title", is_filled(draft.title.as_deref())),
        ("description", is_filled(draft.description.as_deref())),
        ("type", is_filled(draft.intervention_type.as_deref())),
        ("priority", draft.priority.is_some()),
    ] {
        if !filled {
            errors.set(field, required(field));
        }
    }
    if mode == Mode::Create {
        if draft.student_id.is_none() {
            errors.set("studentId", required("studentId"));
        }
        if draft.responsible_id.is_none() {
            errors.set("responsibleId", required("responsibleId"));
        }
    }

    if exceeds(draft.title.as_deref(), limits::TITLE) {
        errors.set(
            "title",
            format!("El título no puede exceder {} caracteres", limits::TITLE),
        );
    }
    if exceeds(draft.description.as_deref(), limits::DESCRIPTION) {
        errors.set(
            "description",
            format!(
                "La descripción no puede exceder {} caracteres",
                limits::DESCRIPTION
            ),
        );
    }

    if let Some(kind) = draft.intervention_type.as_deref().filter(|k| !k.trim().is_empty())
        && kind.parse::<InterventionType>().is_err()
    {
        errors.set("type", "Tipo de intervención no válido");
    }

    if let Some(priority) = draft.priority
        && Priority::from_number(priority).is_none()
    {
        errors.set("priority", "Prioridad no válida");
    }

    if let Some(status) = draft.status.as_deref() {
        match status.parse::<InterventionStatus>() {
            Err(_) => errors.set("status", "Estado no válido"),
            Ok(next) => {
                if mode == Mode::Update
                    && let Some(current) = draft.current_status.as_deref()
                {
                    let reachable = current
                        .parse::<InterventionStatus>()
                        .is_ok_and(|current| current.can_transition_to(next));
                    if !reachable {
                        errors.set("status", "Transición de estado no válida");
                    }
                }
            }
        }
    }

    if let Some(scope) = draft.intervention_scope.as_deref()
        && scope.parse::<InterventionScope>().is_err()
    {
        errors.set("interventionScope", "Ámbito de intervención no válido");
    }

    if let Some(follow_up) = draft.follow_up_date
        && follow_up < now
    {
        errors.set(
            "followUpDate",
            "La fecha de seguimiento no puede ser anterior a hoy",
        );
    }

    if draft.requires_external_referral == Some(true) {
        let details = draft.external_referral_details.as_deref();
        if !is_filled(details) {
            errors.set(
                "externalReferralDetails",
                "Los detalles de la derivación son requeridos",
            );
        } else if exceeds(details, limits::REFERRAL_DETAILS) {
            errors.set(
                "externalReferralDetails",
                format!(
                    "Los detalles no pueden exceder {} caracteres",
                    limits::REFERRAL_DETAILS
                ),
            );
        }
    }

    if let Some(actions) = &draft.actions_taken
        && actions.iter().any(|a| char_len(a) > limits::ACTION_TAKEN)
    {
        errors.set(
            "actionsTaken",
            format!(
                "Cada acción no puede exceder {} caracteres",
                limits::ACTION_TAKEN
            ),
        );
    }

    if exceeds(draft.outcome_evaluation.as_deref(), limits::OUTCOME_EVALUATION) {
        errors.set(
            "outcomeEvaluation",
            format!(
                "La evaluación no puede exceder {} caracteres",
                limits::OUTCOME_EVALUATION
            ),
        );
    }

    errors
}

/// Validate a comment. New comments also need their intervention and author;
/// edits only carry content.
#[must_use]
pub fn validate_comment(draft: &CommentDraft, mode: Mode) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !is_filled(draft.content.as_deref()) {
        errors.set("content", "El contenido es requerido");
    } else if exceeds(draft.content.as_deref(), limits::COMMENT) {
        errors.set(
            "content",
            format!(
                "El comentario no puede exceder {} caracteres",
                limits::COMMENT
            ),
        );
    }

    if mode == Mode::Create {
        if draft.intervention_id.is_none() {
            errors.set("interventionId", "El ID de la intervención es requerido");
        }
        if draft.user_id.is_none() {
            errors.set("userId", "El ID del usuario es requerido");
        }
    }

    errors
}
