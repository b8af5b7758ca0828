mod support;

use aula_client::{ApiError, InterventionService, InterventionState};
use aula_core::drafts::InterventionDraftBuilder;
use aula_core::enums::InterventionStatus;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::json;

use support::{FakeTransport, comment, details, intervention, user};

async fn loaded(fake: &FakeTransport, status: &str) -> InterventionState<FakeTransport> {
    fake.reply(details(1, status, vec![comment(1, "2024-03-02T10:00:00Z")]));
    let mut state = InterventionState::new(InterventionService::new(fake.clone()), 1);
    state.load().await.unwrap();
    state
}

#[tokio::test]
async fn pending_cannot_jump_to_closed() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    let mut state = loaded(&fake, "Pendiente").await;

    let err = state
        .change_status(InterventionStatus::Closed, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "ValidationError");
    assert_eq!(fake.sent().len(), 1, "only the initial load was sent");
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.intervention().status, InterventionStatus::Pending);
    assert_eq!(state.last_error().map(|e| e.kind), Some("ValidationError"));
}

#[tokio::test]
async fn outsider_cannot_change_status() {
    let fake = FakeTransport::signed_in(user(42, "profesor"));
    let mut state = loaded(&fake, "Pendiente").await;

    let err = state
        .change_status(InterventionStatus::InProgress, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "AuthorizationError");
    assert_eq!(fake.sent().len(), 1);
}

#[tokio::test]
async fn resolving_stamps_date_and_freezes_edits() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    let mut state = loaded(&fake, "En Proceso").await;

    let mut resolved = intervention(1, "Resuelto");
    resolved["outcomeEvaluation"] = json!("Asistencia normalizada");
    resolved["dateResolved"] = json!("2024-03-20T09:00:00Z");
    fake.reply(resolved);

    let snapshot = state
        .change_status(
            InterventionStatus::Resolved,
            Some("Asistencia normalizada".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(snapshot.intervention().status, InterventionStatus::Resolved);
    assert_eq!(snapshot.comments.len(), 1, "comments survive the update");

    let put = fake.sent().pop().unwrap();
    assert_eq!(put.method, Method::PUT);
    assert_eq!(put.path, "/interventions/1");
    let body = put.body.unwrap();
    assert_eq!(body["status"], json!("Resuelto"));
    assert_eq!(body["outcomeEvaluation"], json!("Asistencia normalizada"));
    assert_eq!(body["informerId"], json!(9));
    assert!(body["dateResolved"].is_string());

    let err = state
        .update_actions_taken(vec!["Entrevista con apoderado".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "AuthorizationError");
    assert_eq!(fake.sent().len(), 2);

    let computed = state
        .computed(Utc.with_ymd_and_hms(2024, 3, 21, 0, 0, 0).unwrap())
        .unwrap();
    assert!(!computed.is_active);
    assert!(computed.has_resolution);
    assert_eq!(computed.days_since_creation, 19);
}

#[tokio::test]
async fn update_checks_status_against_the_loaded_record() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    let mut state = loaded(&fake, "Pendiente").await;

    let change = InterventionDraftBuilder::new()
        .current_status(InterventionStatus::Resolved)
        .status(InterventionStatus::Closed)
        .build();
    let err = state.update(change).await.unwrap_err();

    assert_eq!(err.kind(), "ValidationError");
    assert_eq!(fake.sent().len(), 1, "nothing sent after the load");
    assert_eq!(
        state.snapshot().unwrap().intervention().status,
        InterventionStatus::Pending
    );
}

#[tokio::test]
async fn update_to_resolved_stamps_resolution_date() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    let mut state = loaded(&fake, "En Proceso").await;
    fake.reply(intervention(1, "Resuelto"));

    let change = InterventionDraftBuilder::new()
        .status(InterventionStatus::Resolved)
        .build();
    state.update(change).await.unwrap();

    let body = fake.last_body();
    assert_eq!(body["status"], json!("Resuelto"));
    assert!(body["dateResolved"].is_string());
    assert!(body.get("currentStatus").is_none());
}

#[tokio::test]
async fn update_keeping_the_same_status_is_not_a_transition() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    let mut state = loaded(&fake, "En Proceso").await;
    fake.reply(intervention(1, "En Proceso"));

    let change = InterventionDraftBuilder::new()
        .status(InterventionStatus::InProgress)
        .parent_feedback("Apoderada conforme")
        .build();
    state.update(change).await.unwrap();

    let body = fake.last_body();
    assert_eq!(body["status"], json!("En Proceso"));
    assert_eq!(body["parentFeedback"], json!("Apoderada conforme"));
    assert!(body.get("dateResolved").is_none_or(serde_json::Value::is_null));
}

#[tokio::test]
async fn backend_failure_leaves_snapshot_untouched() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    let mut state = loaded(&fake, "En Proceso").await;
    fake.fail(ApiError::Server {
        status: 503,
        message: "Mantención".to_string(),
    });

    let err = state
        .update_parent_feedback("Apoderada conforme")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "ServerError");
    assert_eq!(fake.sent().len(), 2);
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.intervention().status, InterventionStatus::InProgress);
    assert_eq!(snapshot.intervention().parent_feedback, None);
    assert_eq!(snapshot.comments.len(), 1);
    assert_eq!(state.last_error().map(|e| e.kind), Some("ServerError"));

    fake.fail(ApiError::Server {
        status: 500,
        message: "Error interno".to_string(),
    });
    let err = state
        .change_status(InterventionStatus::Resolved, Some("Resuelto".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "ServerError");
    assert_eq!(
        state.snapshot().unwrap().intervention().status,
        InterventionStatus::InProgress
    );
    assert_eq!(state.snapshot().unwrap().intervention().date_resolved, None);
}

#[tokio::test]
async fn new_comment_goes_first() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    let mut state = loaded(&fake, "Resuelto").await;
    fake.reply(comment(9, "2024-03-10T10:00:00Z"));

    let added = state.add_comment("Seguimiento telefónico").await.unwrap();

    assert_eq!(added.comment.id, 9);
    let ids: Vec<i64> = state
        .snapshot()
        .unwrap()
        .comments
        .iter()
        .map(|c| c.comment.id)
        .collect();
    assert_eq!(ids, vec![9, 1]);
    let body = fake.last_body();
    assert_eq!(body["content"], json!("Seguimiento telefónico"));
    assert_eq!(body["interventionId"], json!(1));
    assert_eq!(body["userId"], json!(5));
}

#[tokio::test]
async fn closed_intervention_takes_no_comments() {
    let fake = FakeTransport::signed_in(user(1, "admin"));
    let mut state = loaded(&fake, "Cerrado").await;

    let err = state.add_comment("tarde").await.unwrap_err();

    assert_eq!(err.kind(), "AuthorizationError");
    assert_eq!(fake.sent().len(), 1);
}

#[tokio::test]
async fn only_admins_delete_comments() {
    let teacher = FakeTransport::signed_in(user(5, "profesor"));
    let mut state = loaded(&teacher, "En Proceso").await;
    assert!(state.delete_comment(1).await.is_err());
    assert_eq!(state.snapshot().unwrap().comments.len(), 1);
    assert_eq!(teacher.sent().len(), 1);

    let admin = FakeTransport::signed_in(user(1, "admin"));
    let mut state = loaded(&admin, "En Proceso").await;
    admin.reply(json!(null));
    state.delete_comment(1).await.unwrap();
    assert!(state.snapshot().unwrap().comments.is_empty());
    let delete = admin.sent().pop().unwrap();
    assert_eq!(delete.method, Method::DELETE);
    assert_eq!(delete.path, "/intervention-comments/1");
}

#[tokio::test]
async fn permissions_follow_the_snapshot() {
    let fake = FakeTransport::signed_in(user(9, "profesional"));
    let state = loaded(&fake, "Pendiente").await;

    let flags = state.permissions();
    assert!(flags.is_informer);
    assert!(!flags.is_responsible);
    assert!(flags.can_edit);
    assert!(!flags.can_delete_comments);
}
