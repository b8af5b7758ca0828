mod support;

use aula_client::{ApiError, AuthService, InterventionService};
use aula_core::drafts::InterventionDraftBuilder;
use aula_core::enums::{InterventionStatus, InterventionType, Priority};
use aula_core::filter::InterventionFilter;
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::json;

use support::{FakeTransport, comment, details, intervention, user};

#[tokio::test]
async fn invalid_draft_never_reaches_the_backend() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    let service = InterventionService::new(fake.clone());

    let draft = InterventionDraftBuilder::new().title("   ").build();
    let err = service.create(&draft).await.unwrap_err();

    let ApiError::Validation { fields, .. } = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(fields.contains("title"));
    assert!(fields.contains("studentId"));
    assert!(fake.sent().is_empty());
}

#[tokio::test]
async fn create_defaults_status_and_report_date() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    fake.reply(intervention(11, "Pendiente"));
    let service = InterventionService::new(fake.clone());

    let draft = InterventionDraftBuilder::new()
        .title("Ausencias reiteradas")
        .description("Tres semanas sin asistir los lunes")
        .intervention_type(InterventionType::Attendance)
        .priority(Priority::High)
        .student_id(3)
        .responsible_id(5)
        .informer_id(9)
        .build();
    let created = service.create(&draft).await.unwrap();

    assert_eq!(created.intervention.id, 11);
    assert_eq!(created.status_label, "Pendiente");
    let sent = fake.sent();
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(sent[0].path, "/interventions");
    let body = fake.last_body();
    assert_eq!(body["status"], json!("Pendiente"));
    assert_eq!(body["type"], json!("Asistencia"));
    assert!(body["dateReported"].is_string());
}

#[tokio::test]
async fn details_split_and_sort_comments() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    fake.reply(details(
        1,
        "En Proceso",
        vec![
            comment(1, "2024-03-02T10:00:00Z"),
            comment(2, "2024-03-05T10:00:00Z"),
            comment(3, "2024-03-03T10:00:00Z"),
        ],
    ));
    let service = InterventionService::new(fake.clone());

    let loaded = service.get_with_details(1).await.unwrap();

    let ids: Vec<i64> = loaded.comments.iter().map(|c| c.comment.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(loaded.intervention().status, InterventionStatus::InProgress);
    assert_eq!(fake.sent()[0].path, "/interventions/1/details");
}

#[tokio::test]
async fn list_accepts_wrapped_rows_and_filters_locally() {
    let fake = FakeTransport::signed_in(user(1, "admin"));
    fake.reply(json!({
        "data": [intervention(1, "Pendiente"), intervention(2, "Cerrado")],
        "total": 2
    }));
    let service = InterventionService::new(fake.clone());

    let filter = InterventionFilter {
        status: Some(InterventionStatus::Pending),
        ..InterventionFilter::default()
    };
    let rows = service.list(&filter).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].intervention.id, 1);
    assert!(
        fake.sent()[0]
            .query
            .contains(&("status".to_string(), "Pendiente".to_string()))
    );
}

#[tokio::test]
async fn login_without_token_leaves_no_session() {
    let fake = FakeTransport::default();
    fake.reply(json!({ "user": { "id": 5, "firstName": "Ana", "lastName": "Rojas",
        "email": "ana@colegio.cl", "role": "profesor" } }));
    let auth = AuthService::new(fake.clone());

    let err = auth.login("ana@colegio.cl", "secreta").await.unwrap_err();

    assert_eq!(err.kind(), "AuthError");
    assert_eq!(err.to_string(), "Token no recibido del servidor");
    assert!(!aula_client::Transport::session(&fake).is_authenticated());
}

#[tokio::test]
async fn login_starts_session_with_trimmed_email() {
    let fake = FakeTransport::default();
    fake.reply(json!({ "token": "abc", "user": { "id": 5, "firstName": "Ana",
        "lastName": "Rojas", "email": "ana@colegio.cl", "role": "profesor" } }));
    let auth = AuthService::new(fake.clone());

    let session = auth.login("  ana@colegio.cl ", "secreta").await.unwrap();

    assert_eq!(session.token, "abc");
    assert_eq!(fake.last_body()["email"], json!("ana@colegio.cl"));
    let handle = aula_client::Transport::session(&fake);
    assert_eq!(handle.token().as_deref(), Some("abc"));
    assert_eq!(handle.user().map(|u| u.id), Some(5));
}

#[tokio::test]
async fn logout_clears_even_when_backend_fails() {
    let fake = FakeTransport::signed_in(user(5, "profesor"));
    fake.fail(ApiError::Network("down".to_string()));
    let auth = AuthService::new(fake.clone());

    auth.logout().await;

    assert!(!aula_client::Transport::session(&fake).is_authenticated());
    assert_eq!(fake.sent()[0].path, "/auth/logout");
}
