//! The intervention currently being viewed or edited.
//!
//! [`InterventionState`] owns one snapshot and funnels every mutation
//! through the permission engine and the service: merge the change into the
//! snapshot, send the full record, then replace the snapshot with what the
//! backend returned. Nothing is shown speculatively, so a failed mutation
//! leaves the snapshot as it was and records the error in
//! [`InterventionState::last_error`].

use aula_core::drafts::{CommentDraft, InterventionDraft, InterventionDraftBuilder};
use aula_core::entities::{CommentRecord, Intervention, InterventionDetails, RecordId, User};
use aula_core::enums::{InterventionStatus, Role};
use aula_core::errors::CoreError;
use aula_core::permissions::{
    InterventionPermissions, can_add_comments, can_modify, is_party, is_valid_status_change,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ApiError, ErrorReport, NOT_FOUND_MESSAGE};
use crate::services::InterventionService;
use crate::transport::Transport;

const CANNOT_MODIFY: &str = "No tiene permisos para modificar esta intervención";
const CANNOT_CHANGE_STATUS: &str = "No tiene permisos para cambiar el estado de esta intervención";
const CANNOT_COMMENT: &str = "No se pueden agregar comentarios en el estado actual";
const CANNOT_DELETE_COMMENT: &str = "Solo un administrador puede eliminar comentarios";

/// Values derived from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Computed {
    pub is_active: bool,
    pub requires_follow_up: bool,
    pub days_since_creation: i64,
    pub has_resolution: bool,
    pub has_external_referral: bool,
}

impl Computed {
    #[must_use]
    pub fn of(intervention: &Intervention, now: DateTime<Utc>) -> Self {
        let started = intervention.date_reported.or(intervention.created_at);
        Self {
            is_active: intervention.is_active(),
            requires_follow_up: intervention.follow_up_date.is_some_and(|at| at > now),
            days_since_creation: started.map_or(0, |at| (now - at).num_days().max(0)),
            has_resolution: intervention.date_resolved.is_some(),
            has_external_referral: intervention.requires_external_referral,
        }
    }
}

pub struct InterventionState<T> {
    service: InterventionService<T>,
    id: RecordId,
    snapshot: Option<InterventionDetails>,
    last_error: Option<ErrorReport>,
}

impl<T: Transport> InterventionState<T> {
    /// An empty state for intervention `id`; call [`Self::load`] to fill it.
    pub const fn new(service: InterventionService<T>, id: RecordId) -> Self {
        Self {
            service,
            id,
            snapshot: None,
            last_error: None,
        }
    }

    pub const fn id(&self) -> RecordId {
        self.id
    }

    pub const fn snapshot(&self) -> Option<&InterventionDetails> {
        self.snapshot.as_ref()
    }

    pub const fn last_error(&self) -> Option<&ErrorReport> {
        self.last_error.as_ref()
    }

    /// Flags for the signed-in user against the current snapshot.
    pub fn permissions(&self) -> InterventionPermissions {
        let user = self.service.transport().session().user();
        InterventionPermissions::for_user(
            self.snapshot.as_ref().map(InterventionDetails::intervention),
            user.as_ref(),
        )
    }

    pub fn computed(&self, now: DateTime<Utc>) -> Option<Computed> {
        self.snapshot
            .as_ref()
            .map(|s| Computed::of(s.intervention(), now))
    }

    // ----- Loading -----

    /// Fetch the intervention with relations and comments.
    ///
    /// # Errors
    ///
    /// Returns the service failure; the previous snapshot is kept.
    pub async fn load(&mut self) -> Result<&InterventionDetails, ApiError> {
        self.last_error = None;
        let result = self.service.get_with_details(self.id).await;
        let details = self.track(result)?;
        Ok(&*self.snapshot.insert(details))
    }

    /// Same as [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns the service failure; the previous snapshot is kept.
    pub async fn refresh(&mut self) -> Result<&InterventionDetails, ApiError> {
        self.load().await
    }

    // ----- Field mutations -----

    /// Merge `change` into the snapshot and save it.
    ///
    /// Requires edit rights. The informer is never changed, and a `status`
    /// in `change` goes through the same checks and side effects as
    /// [`Self::change_status`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` without edit rights,
    /// `ApiError::Validation` for an invalid merged record or transition,
    /// or the service failure.
    pub async fn update(&mut self, change: InterventionDraft) -> Result<&InterventionDetails, ApiError> {
        self.last_error = None;
        let result = self.try_update(change).await;
        self.track(result)?;
        self.details()
    }

    async fn try_update(&mut self, mut change: InterventionDraft) -> Result<(), ApiError> {
        let (current, user) = self.context().await?;
        if !can_modify(Some(&current), Some(&user)) {
            return Err(ApiError::Forbidden(CANNOT_MODIFY.to_string()));
        }
        change.current_status = None;
        let next = change
            .status
            .take()
            .map(|status| status.parse::<InterventionStatus>())
            .transpose()?;
        if let Some(next) = next.filter(|next| *next != current.status) {
            change.merge(status_change(&current, &user, next, None)?);
        }
        self.save(&current, change).await
    }

    /// Move to `next`. Reaching Resuelto stamps `dateResolved` and, when
    /// given, stores `resolution` as the outcome evaluation.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` for a user who is neither admin nor
    /// named on the intervention, `ApiError::Validation` for a transition
    /// the table does not allow, or the service failure.
    pub async fn change_status(
        &mut self,
        next: InterventionStatus,
        resolution: Option<String>,
    ) -> Result<&InterventionDetails, ApiError> {
        self.last_error = None;
        let result = self.try_change_status(next, resolution).await;
        self.track(result)?;
        self.details()
    }

    async fn try_change_status(
        &mut self,
        next: InterventionStatus,
        resolution: Option<String>,
    ) -> Result<(), ApiError> {
        let (current, user) = self.context().await?;
        let change = status_change(&current, &user, next, resolution)?;
        self.save(&current, change).await
    }

    /// # Errors
    ///
    /// Same as [`Self::update`].
    pub async fn update_actions_taken(
        &mut self,
        actions: Vec<String>,
    ) -> Result<&InterventionDetails, ApiError> {
        self.update(InterventionDraftBuilder::new().actions_taken(actions).build())
            .await
    }

    /// # Errors
    ///
    /// Same as [`Self::update`].
    pub async fn update_outcome_evaluation(
        &mut self,
        evaluation: impl Into<String>,
    ) -> Result<&InterventionDetails, ApiError> {
        self.update(
            InterventionDraftBuilder::new()
                .outcome_evaluation(evaluation)
                .build(),
        )
        .await
    }

    /// Flag the intervention for external referral with `details`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update`].
    pub async fn update_external_referral(
        &mut self,
        details: impl Into<String>,
    ) -> Result<&InterventionDetails, ApiError> {
        self.update(
            InterventionDraftBuilder::new()
                .external_referral(true, Some(details.into()))
                .build(),
        )
        .await
    }

    /// # Errors
    ///
    /// Same as [`Self::update`]; a date in the past is a validation error.
    pub async fn schedule_follow_up(
        &mut self,
        at: DateTime<Utc>,
    ) -> Result<&InterventionDetails, ApiError> {
        self.update(InterventionDraftBuilder::new().follow_up_date(at).build())
            .await
    }

    /// # Errors
    ///
    /// Same as [`Self::update`].
    pub async fn update_parent_feedback(
        &mut self,
        feedback: impl Into<String>,
    ) -> Result<&InterventionDetails, ApiError> {
        self.update(InterventionDraftBuilder::new().parent_feedback(feedback).build())
            .await
    }

    // ----- Comments -----

    /// Post a comment as the signed-in user and prepend it to the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` when the status does not allow
    /// comments, `ApiError::Validation` for blank or overlong content, or
    /// the service failure.
    pub async fn add_comment(&mut self, content: impl Into<String>) -> Result<CommentRecord, ApiError> {
        self.last_error = None;
        let result = self.try_add_comment(content.into()).await;
        self.track(result)
    }

    async fn try_add_comment(&mut self, content: String) -> Result<CommentRecord, ApiError> {
        let (current, user) = self.context().await?;
        if !can_add_comments(Some(&current), Some(&user)) {
            return Err(ApiError::Forbidden(CANNOT_COMMENT.to_string()));
        }
        let draft = CommentDraft::new(self.id, user.id, content);
        let record = self.service.add_comment(&draft).await?;
        if let Some(snapshot) = &mut self.snapshot {
            snapshot.comments.insert(0, record.clone());
        }
        Ok(record)
    }

    /// Replace a comment's content and swap it in place.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for blank or overlong content, or the
    /// service failure.
    pub async fn update_comment(
        &mut self,
        comment_id: RecordId,
        content: impl Into<String>,
    ) -> Result<CommentRecord, ApiError> {
        self.last_error = None;
        let result = self
            .service
            .update_comment(comment_id, &CommentDraft::edit(content))
            .await;
        let record = self.track(result)?;
        if let Some(slot) = self
            .snapshot
            .as_mut()
            .and_then(|s| s.comments.iter_mut().find(|c| c.comment.id == comment_id))
        {
            *slot = record.clone();
        }
        Ok(record)
    }

    /// Delete a comment. Admin only.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` for non-admins or the service failure.
    pub async fn delete_comment(&mut self, comment_id: RecordId) -> Result<(), ApiError> {
        self.last_error = None;
        let result = self.try_delete_comment(comment_id).await;
        self.track(result)
    }

    async fn try_delete_comment(&mut self, comment_id: RecordId) -> Result<(), ApiError> {
        let user = self.service.transport().session().require_user()?;
        if user.role != Role::Admin {
            return Err(ApiError::Forbidden(CANNOT_DELETE_COMMENT.to_string()));
        }
        self.service.delete_comment(comment_id).await?;
        if let Some(snapshot) = &mut self.snapshot {
            snapshot.comments.retain(|c| c.comment.id != comment_id);
        }
        Ok(())
    }

    // ----- Plumbing -----

    /// The current record and user, loading the record first if needed.
    async fn context(&mut self) -> Result<(Intervention, User), ApiError> {
        if self.snapshot.is_none() {
            let details = self.service.get_with_details(self.id).await?;
            self.snapshot = Some(details);
        }
        let user = self.service.transport().session().require_user()?;
        let current = self.details()?.intervention().clone();
        Ok((current, user))
    }

    /// Merge `change` over `current` and send it. The informer and the
    /// origin status always come from `current`.
    async fn save(&mut self, current: &Intervention, change: InterventionDraft) -> Result<(), ApiError> {
        let moves = change.status.is_some();
        let mut draft = InterventionDraft::from_intervention(current);
        draft.merge(change);
        draft.informer_id = current.informer_id;
        draft.current_status = moves.then(|| current.status.as_str().to_string());
        let record = self.service.update(self.id, &draft).await?;
        if let Some(snapshot) = &mut self.snapshot {
            snapshot.replace_intervention(record.intervention);
        }
        Ok(())
    }

    fn details(&self) -> Result<&InterventionDetails, ApiError> {
        self.snapshot
            .as_ref()
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    fn track<R>(&mut self, result: Result<R, ApiError>) -> Result<R, ApiError> {
        if let Err(err) = &result {
            tracing::warn!(id = self.id, kind = err.kind(), %err, "intervention mutation failed");
            self.last_error = Some(err.report());
        }
        result
    }
}

/// The change that moves `current` to `next`. Reaching Resuelto stamps
/// `dateResolved` and stores `resolution` as the outcome evaluation.
fn status_change(
    current: &Intervention,
    user: &User,
    next: InterventionStatus,
    resolution: Option<String>,
) -> Result<InterventionDraft, ApiError> {
    if !is_party(current, user) {
        return Err(ApiError::Forbidden(CANNOT_CHANGE_STATUS.to_string()));
    }
    if !is_valid_status_change(Some(current.status), Some(next), Some(user)) {
        return Err(CoreError::InvalidTransition {
            from: current.status.to_string(),
            to: next.to_string(),
        }
        .into());
    }
    let mut change = InterventionDraftBuilder::new().status(next);
    if next == InterventionStatus::Resolved {
        change = change.date_resolved(Utc::now());
        if let Some(resolution) = resolution {
            change = change.outcome_evaluation(resolution);
        }
    }
    Ok(change.build())
}
