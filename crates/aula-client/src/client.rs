//! reqwest-backed [`Transport`].

use aula_auth::SessionHandle;
use aula_config::ApiConfig;
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{check_response, should_clear_session, translate_transport};
use crate::transport::{ApiRequest, Transport};

/// HTTP client for the Aula backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionHandle,
}

impl ApiClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(config: &ApiConfig, session: SessionHandle) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("aula/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            config: config.clone(),
            session,
        })
    }

    fn url(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let raw = self.config.url(&request.path);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::Network(format!("{raw}: {e}")))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(request)?;
        tracing::debug!(method = %request.method, %url, "api request");

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(ACCEPT, "application/json");
        if let Some(bearer) = self.session.bearer() {
            builder = builder.header(AUTHORIZATION, bearer);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| translate_transport(&e))?;
        check_response(resp).await
    }
}

impl Transport for ApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let result = self.dispatch(&request).await;
        if let Err(err) = &result
            && should_clear_session(err, &request.path)
        {
            tracing::info!(path = %request.path, "session rejected by backend; signing out");
            if let Err(error) = self.session.end() {
                tracing::warn!(%error, "failed to clear stored session");
            }
        }
        result
    }

    fn session(&self) -> &SessionHandle {
        &self.session
    }
}
