use aula_core::drafts::UserDraft;
use aula_core::entities::{RecordId, User, UserRecord};
use aula_core::enums::Role;
use aula_core::filter::UserFilter;
use aula_core::format::UserPayload;
use aula_core::validation::{Mode, validate_user};

use super::{decode, decode_list};
use crate::endpoints;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

/// Staff accounts.
#[derive(Debug, Clone)]
pub struct UserService<T> {
    transport: T,
}

impl<T: Transport> UserService<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<UserRecord>, ApiError> {
        let request = ApiRequest::get(endpoints::USERS).with_query(filter.to_query());
        let rows: Vec<User> = decode_list(self.transport.send(request).await?)?;
        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn get(&self, id: RecordId) -> Result<UserRecord, ApiError> {
        let value = self.transport.send(ApiRequest::get(endpoints::user(id))).await?;
        Ok(UserRecord::from(decode::<User>(value)?))
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` without calling the backend when the
    /// draft is invalid, otherwise the translated backend failure.
    pub async fn create(&self, draft: &UserDraft) -> Result<UserRecord, ApiError> {
        validate_user(draft, Mode::Create).into_result()?;
        let request =
            ApiRequest::post(endpoints::USERS).with_json(&UserPayload::from_draft(draft, Mode::Create))?;
        let created: User = decode(self.transport.send(request).await?)?;
        tracing::info!(id = created.id, role = created.role.as_str(), "user created");
        Ok(UserRecord::from(created))
    }

    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update(&self, id: RecordId, draft: &UserDraft) -> Result<UserRecord, ApiError> {
        validate_user(draft, Mode::Update).into_result()?;
        let request =
            ApiRequest::put(endpoints::user(id)).with_json(&UserPayload::from_draft(draft, Mode::Update))?;
        let updated: User = decode(self.transport.send(request).await?)?;
        Ok(UserRecord::from(updated))
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        self.transport.send(ApiRequest::delete(endpoints::user(id))).await?;
        Ok(())
    }

    /// Active staff who can be assigned an intervention.
    ///
    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn professionals(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.list(&UserFilter {
            roles: vec![Role::Profesional, Role::Profesor],
            is_active: Some(true),
            ..UserFilter::default()
        })
        .await
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn teachers(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.list(&UserFilter {
            roles: vec![Role::Profesor],
            is_active: Some(true),
            ..UserFilter::default()
        })
        .await
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn set_active(&self, id: RecordId, active: bool) -> Result<UserRecord, ApiError> {
        let request = ApiRequest::put(endpoints::user(id)).with_json(&UserPayload::active_flag(active))?;
        let updated: User = decode(self.transport.send(request).await?)?;
        tracing::info!(id, active, "user active flag changed");
        Ok(UserRecord::from(updated))
    }
}
