use aula_core::drafts::{CommentDraft, InterventionDraft};
use aula_core::entities::{
    Comment, CommentRecord, Intervention, InterventionDetails, InterventionRecord, RecordId,
};
use aula_core::filter::InterventionFilter;
use aula_core::format::{CommentPayload, InterventionPayload};
use aula_core::validation::{Mode, validate_comment, validate_intervention};
use chrono::Utc;
use serde_json::Value;

use super::{decode, decode_list};
use crate::endpoints;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

/// Interventions and their comments.
#[derive(Debug, Clone)]
pub struct InterventionService<T> {
    transport: T,
}

impl<T: Transport> InterventionService<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the list, sending the filter as query parameters and then
    /// applying it locally as well.
    ///
    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn list(&self, filter: &InterventionFilter) -> Result<Vec<InterventionRecord>, ApiError> {
        let request = ApiRequest::get(endpoints::INTERVENTIONS).with_query(filter.to_query());
        let rows: Vec<Intervention> = decode_list(self.transport.send(request).await?)?;
        let records = rows.into_iter().map(InterventionRecord::from).collect();
        Ok(filter.apply(records))
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn get(&self, id: RecordId) -> Result<InterventionRecord, ApiError> {
        let value = self.transport.send(ApiRequest::get(endpoints::intervention(id))).await?;
        Ok(InterventionRecord::from(decode::<Intervention>(value)?))
    }

    /// The intervention with relations and comments, newest comment first.
    ///
    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn get_with_details(&self, id: RecordId) -> Result<InterventionDetails, ApiError> {
        let mut value = self
            .transport
            .send(ApiRequest::get(endpoints::intervention_details(id)))
            .await?;
        let comments = match value.as_object_mut().and_then(|o| o.remove("comments")) {
            Some(Value::Array(items)) => decode::<Vec<Comment>>(Value::Array(items))?,
            _ => Vec::new(),
        };
        let intervention: Intervention = decode(value)?;
        let mut comments: Vec<CommentRecord> = comments.into_iter().map(CommentRecord::from).collect();
        comments.sort_by(|a, b| b.comment.created_at.cmp(&a.comment.created_at));
        Ok(InterventionDetails {
            record: InterventionRecord::from(intervention),
            comments,
        })
    }

    /// Validate, normalize, and create.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` without calling the backend when the
    /// draft is invalid, otherwise the translated backend failure.
    pub async fn create(&self, draft: &InterventionDraft) -> Result<InterventionRecord, ApiError> {
        let body = Self::payload(draft, Mode::Create)?;
        let request = ApiRequest::post(endpoints::INTERVENTIONS).with_json(&body)?;
        let created: Intervention = decode(self.transport.send(request).await?)?;
        tracing::info!(id = created.id, "intervention created");
        Ok(InterventionRecord::from(created))
    }

    /// Validate, normalize, and update.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update(
        &self,
        id: RecordId,
        draft: &InterventionDraft,
    ) -> Result<InterventionRecord, ApiError> {
        let body = Self::payload(draft, Mode::Update)?;
        let request = ApiRequest::put(endpoints::intervention(id)).with_json(&body)?;
        let updated: Intervention = decode(self.transport.send(request).await?)?;
        Ok(InterventionRecord::from(updated))
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        self.transport.send(ApiRequest::delete(endpoints::intervention(id))).await?;
        tracing::info!(id, "intervention deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` for blank or overlong content or a
    /// missing intervention/user id, otherwise the backend failure.
    pub async fn add_comment(&self, draft: &CommentDraft) -> Result<CommentRecord, ApiError> {
        validate_comment(draft, Mode::Create).into_result()?;
        let request = ApiRequest::post(endpoints::COMMENTS).with_json(&CommentPayload::from(draft))?;
        let comment: Comment = decode(self.transport.send(request).await?)?;
        Ok(CommentRecord::from(comment))
    }

    /// Only the content is sent.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_comment`].
    pub async fn update_comment(
        &self,
        id: RecordId,
        draft: &CommentDraft,
    ) -> Result<CommentRecord, ApiError> {
        validate_comment(draft, Mode::Update).into_result()?;
        let body = CommentPayload {
            intervention_id: None,
            user_id: None,
            ..CommentPayload::from(draft)
        };
        let request = ApiRequest::put(endpoints::comment(id)).with_json(&body)?;
        let comment: Comment = decode(self.transport.send(request).await?)?;
        Ok(CommentRecord::from(comment))
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn delete_comment(&self, id: RecordId) -> Result<(), ApiError> {
        self.transport.send(ApiRequest::delete(endpoints::comment(id))).await?;
        Ok(())
    }

    fn payload(draft: &InterventionDraft, mode: Mode) -> Result<InterventionPayload, ApiError> {
        let now = Utc::now();
        validate_intervention(draft, mode, now).into_result()?;
        Ok(InterventionPayload::from_draft(draft, mode, now)?)
    }
}
