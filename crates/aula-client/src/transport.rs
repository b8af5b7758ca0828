//! The seam between services and the wire.

use std::future::Future;

use aula_auth::SessionHandle;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// One backend call: method, endpoint path, query pairs, and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn with_query<K: Into<String>>(mut self, query: Vec<(K, String)>) -> Self {
        self.query = query.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if `body` cannot be serialized.
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Sends requests on behalf of the signed-in session.
///
/// Implementations attach the bearer token when a session exists and end
/// the session on a 401 from any path other than login.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Value, ApiError>> + Send;

    fn session(&self) -> &SessionHandle;
}
