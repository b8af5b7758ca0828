//! An in-memory [`Transport`] that replays canned responses and records
//! every request it receives.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use aula_auth::{Session, SessionHandle};
use aula_client::{ApiError, ApiRequest, Transport};
use aula_core::entities::User;
use serde_json::{Value, json};

#[derive(Clone, Default)]
pub struct FakeTransport {
    replies: Arc<Mutex<VecDeque<Result<Value, ApiError>>>>,
    sent: Arc<Mutex<Vec<ApiRequest>>>,
    session: SessionHandle,
}

impl FakeTransport {
    pub fn signed_in(user: User) -> Self {
        let fake = Self::default();
        fake.session
            .begin(Session::new("tok-test", user))
            .expect("in-memory session");
        fake
    }

    pub fn reply(&self, value: Value) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(value));
        self
    }

    pub fn fail(&self, error: ApiError) -> &Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Value {
        self.sent()
            .last()
            .and_then(|r| r.body.clone())
            .expect("request with a body")
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Value, ApiError>> + Send {
        self.sent.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no canned reply".to_string())));
        async move { reply }
    }

    fn session(&self) -> &SessionHandle {
        &self.session
    }
}

pub fn user(id: i64, role: &str) -> User {
    serde_json::from_value(json!({
        "id": id,
        "firstName": "Usuario",
        "lastName": format!("N{id}"),
        "email": format!("u{id}@colegio.cl"),
        "role": role
    }))
    .expect("user")
}

pub fn intervention(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "title": "Ausencias reiteradas",
        "description": "Tres semanas sin asistir los lunes",
        "type": "Asistencia",
        "status": status,
        "priority": 2,
        "interventionScope": "Individual",
        "studentId": 3,
        "responsibleId": 5,
        "informerId": 9,
        "dateReported": "2024-03-01T12:00:00Z",
        "actionsTaken": [],
        "requiresExternalReferral": false,
        "createdAt": "2024-03-01T12:00:00Z"
    })
}

pub fn comment(id: i64, created_at: &str) -> Value {
    json!({
        "id": id,
        "content": format!("comentario {id}"),
        "interventionId": 1,
        "userId": 5,
        "createdAt": created_at
    })
}

pub fn details(id: i64, status: &str, comments: Vec<Value>) -> Value {
    let mut value = intervention(id, status);
    value["comments"] = Value::Array(comments);
    value
}
