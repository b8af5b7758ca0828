use aula_auth::Session;
use aula_core::entities::User;
use serde::{Deserialize, Serialize};

use super::decode;
use crate::endpoints;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

pub const MISSING_TOKEN_MESSAGE: &str = "Token no recibido del servidor";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
    user: Option<User>,
}

/// Sign-in, sign-out, and profile refresh against the injected session.
#[derive(Debug, Clone)]
pub struct AuthService<T> {
    transport: T,
}

impl<T: Transport> AuthService<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Sign in and start a session.
    ///
    /// Any failure leaves no session behind.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Auth` for rejected credentials or a response
    /// without a token, or the translated backend failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let result = self.try_login(email, password).await;
        if result.is_err() {
            self.clear_session();
        }
        result
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let request = ApiRequest::post(endpoints::LOGIN).with_json(&Credentials {
            email: email.trim(),
            password,
        })?;
        let response: LoginResponse = decode(self.transport.send(request).await?)?;
        let token = response
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::Auth(MISSING_TOKEN_MESSAGE.to_string()))?;
        let user = response
            .user
            .ok_or_else(|| ApiError::Decode("login response without user".to_string()))?;
        let session = Session::new(token, user);
        self.transport.session().begin(session.clone())?;
        tracing::info!(user_id = session.user.id, role = session.user.role.as_str(), "signed in");
        Ok(session)
    }

    /// Sign out. Backend failures are logged; the local session is always
    /// cleared.
    pub async fn logout(&self) {
        if let Err(error) = self.transport.send(ApiRequest::post(endpoints::LOGOUT)).await {
            tracing::warn!(%error, "logout request failed");
        }
        self.clear_session();
        tracing::info!("signed out");
    }

    /// Fetch the current profile and refresh the cached user.
    ///
    /// # Errors
    ///
    /// Returns the translated backend failure. A 401 also ends the session.
    pub async fn profile(&self) -> Result<User, ApiError> {
        let user: User = decode(self.transport.send(ApiRequest::get(endpoints::PROFILE)).await?)?;
        if let Err(error) = self.transport.session().replace_user(user.clone()) {
            tracing::warn!(%error, "could not cache refreshed profile");
        }
        Ok(user)
    }

    fn clear_session(&self) {
        if let Err(error) = self.transport.session().end() {
            tracing::warn!(%error, "failed to clear stored session");
        }
    }
}
