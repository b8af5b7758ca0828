//! Walks an intervention through its lifecycle using only the pure domain
//! layer: draft → validation → payload → record → permission checks.

use aula_core::drafts::{InterventionDraft, InterventionDraftBuilder};
use aula_core::entities::{Intervention, InterventionRecord, User};
use aula_core::enums::{InterventionStatus, InterventionType, Priority, Role};
use aula_core::format::InterventionPayload;
use aula_core::permissions::{can_modify, is_valid_status_change};
use aula_core::validation::{Mode, validate_intervention};
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 10, 14, 0, 0).unwrap()
}

fn teacher() -> User {
    serde_json::from_value(serde_json::json!({
        "id": 5,
        "firstName": "Ana",
        "lastName": "Rojas",
        "email": "ana@colegio.cl",
        "role": "profesor"
    }))
    .unwrap()
}

/// Simulate the backend echoing a payload back with an id.
fn persist(payload: &InterventionPayload, id: i64) -> Intervention {
    let mut json = serde_json::to_value(payload).unwrap();
    json["id"] = id.into();
    serde_json::from_value(json).unwrap()
}

#[test]
fn new_intervention_defaults_to_pending_and_cannot_close_directly() {
    let draft = InterventionDraftBuilder::new()
        .title("Dificultad en matemáticas")
        .description("Notas bajo 4.0 en tres evaluaciones")
        .intervention_type(InterventionType::Academic)
        .priority(Priority::Medium)
        .student_id(3)
        .responsible_id(5)
        .informer_id(9)
        .build();
    assert!(validate_intervention(&draft, Mode::Create, now()).is_empty());

    let payload = InterventionPayload::from_draft(&draft, Mode::Create, now()).unwrap();
    assert_eq!(payload.status, Some(InterventionStatus::Pending));

    let stored = persist(&payload, 1);
    let user = teacher();
    assert!(can_modify(Some(&stored), Some(&user)));
    assert!(!is_valid_status_change(
        Some(stored.status),
        Some(InterventionStatus::Closed),
        Some(&user)
    ));
    assert!(is_valid_status_change(
        Some(stored.status),
        Some(InterventionStatus::InProgress),
        Some(&user)
    ));

    let record = InterventionRecord::from(stored);
    assert!(record.is_active);
    assert_eq!(record.status_label, "Pendiente");
}

#[test]
fn resolving_then_reopening_keeps_resolution_date() {
    let draft = InterventionDraftBuilder::new()
        .title("Ausencias")
        .description("Ausencias reiteradas")
        .intervention_type(InterventionType::Attendance)
        .priority(Priority::High)
        .student_id(3)
        .responsible_id(5)
        .status(InterventionStatus::InProgress)
        .build();
    let stored = persist(&InterventionPayload::from_draft(&draft, Mode::Create, now()).unwrap(), 2);

    let mut resolve = InterventionDraft::from_intervention(&stored);
    resolve.merge(
        InterventionDraftBuilder::new()
            .status(InterventionStatus::Resolved)
            .date_resolved(now())
            .outcome_evaluation("Asistencia normalizada")
            .build(),
    );
    assert!(validate_intervention(&resolve, Mode::Update, now()).is_empty());
    let resolved = persist(&InterventionPayload::from_draft(&resolve, Mode::Update, now()).unwrap(), 2);
    assert_eq!(resolved.date_resolved, Some(now()));
    assert!(!InterventionRecord::from(resolved.clone()).is_active);

    let mut reopen = InterventionDraft::from_intervention(&resolved);
    reopen.merge(
        InterventionDraftBuilder::new()
            .status(InterventionStatus::InProgress)
            .build(),
    );
    assert!(validate_intervention(&reopen, Mode::Update, now()).is_empty());
    let reopened = persist(&InterventionPayload::from_draft(&reopen, Mode::Update, now()).unwrap(), 2);
    assert_eq!(reopened.status, InterventionStatus::InProgress);
    assert_eq!(reopened.date_resolved, Some(now()));
}

#[test]
fn closed_intervention_is_frozen() {
    let closed: Intervention = serde_json::from_value(serde_json::json!({
        "id": 3,
        "title": "Caso cerrado",
        "type": "Otro",
        "status": "Cerrado",
        "priority": 3,
        "responsibleId": 5
    }))
    .unwrap();
    let admin: User = serde_json::from_value(serde_json::json!({
        "id": 1, "firstName": "Root", "lastName": "Admin", "email": "a@c.cl", "role": "admin"
    }))
    .unwrap();
    assert!(!can_modify(Some(&closed), Some(&admin)));
    for next in InterventionStatus::ALL {
        assert!(!is_valid_status_change(Some(closed.status), Some(next), Some(&admin)));
    }
    assert_eq!(Role::Admin.label(), "Administrador");
}
