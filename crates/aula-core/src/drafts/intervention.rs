//! Intervention draft and builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Intervention, RecordId};
use crate::enums::{InterventionScope, InterventionStatus, InterventionType, Priority};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterventionDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub intervention_type: Option<String>,
    pub status: Option<String>,
    /// Status the record had when the edit began. Only used to check the
    /// transition on update; never sent to the backend.
    pub current_status: Option<String>,
    pub priority: Option<i64>,
    pub intervention_scope: Option<String>,
    pub student_id: Option<RecordId>,
    pub responsible_id: Option<RecordId>,
    pub informer_id: Option<RecordId>,
    pub date_reported: Option<DateTime<Utc>>,
    pub date_resolved: Option<DateTime<Utc>>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub actions_taken: Option<Vec<String>>,
    pub outcome_evaluation: Option<String>,
    pub requires_external_referral: Option<bool>,
    pub external_referral_details: Option<String>,
    pub parent_feedback: Option<String>,
}

impl InterventionDraft {
    /// A full draft mirroring an existing record, ready to have a partial
    /// change merged in before an update. `current_status` is left unset;
    /// callers that move the status set it themselves.
    #[must_use]
    pub fn from_intervention(intervention: &Intervention) -> Self {
        Self {
            title: Some(intervention.title.clone()),
            description: Some(intervention.description.clone()),
            intervention_type: Some(intervention.intervention_type.as_str().to_string()),
            status: Some(intervention.status.as_str().to_string()),
            current_status: None,
            priority: Some(i64::from(intervention.priority.as_number())),
            intervention_scope: Some(intervention.intervention_scope.as_str().to_string()),
            student_id: intervention.student_id,
            responsible_id: intervention.responsible_id,
            informer_id: intervention.informer_id,
            date_reported: intervention.date_reported,
            date_resolved: intervention.date_resolved,
            follow_up_date: intervention.follow_up_date,
            actions_taken: Some(intervention.actions_taken.clone()),
            outcome_evaluation: intervention.outcome_evaluation.clone(),
            requires_external_referral: Some(intervention.requires_external_referral),
            external_referral_details: intervention.external_referral_details.clone(),
            parent_feedback: intervention.parent_feedback.clone(),
        }
    }

    /// Overlay every field that is set in `change` onto `self`.
    pub fn merge(&mut self, change: Self) {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(if change.$field.is_some() { self.$field = change.$field; })*
            };
        }
        overlay!(
            title,
            description,
            intervention_type,
            status,
            current_status,
            priority,
            intervention_scope,
            student_id,
            responsible_id,
            informer_id,
            date_reported,
            date_resolved,
            follow_up_date,
            actions_taken,
            outcome_evaluation,
            requires_external_referral,
            external_referral_details,
            parent_feedback,
        );
    }
}

/// Fluent construction of an [`InterventionDraft`] from typed values.
#[derive(Debug, Default)]
pub struct InterventionDraftBuilder(InterventionDraft);

impl InterventionDraftBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn intervention_type(mut self, kind: InterventionType) -> Self {
        self.0.intervention_type = Some(kind.as_str().to_string());
        self
    }

    #[must_use]
    pub fn status(mut self, status: InterventionStatus) -> Self {
        self.0.status = Some(status.as_str().to_string());
        self
    }

    #[must_use]
    pub fn current_status(mut self, status: InterventionStatus) -> Self {
        self.0.current_status = Some(status.as_str().to_string());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.0.priority = Some(i64::from(priority.as_number()));
        self
    }

    #[must_use]
    pub fn scope(mut self, scope: InterventionScope) -> Self {
        self.0.intervention_scope = Some(scope.as_str().to_string());
        self
    }

    #[must_use]
    pub const fn student_id(mut self, id: RecordId) -> Self {
        self.0.student_id = Some(id);
        self
    }

    #[must_use]
    pub const fn responsible_id(mut self, id: RecordId) -> Self {
        self.0.responsible_id = Some(id);
        self
    }

    #[must_use]
    pub const fn informer_id(mut self, id: RecordId) -> Self {
        self.0.informer_id = Some(id);
        self
    }

    #[must_use]
    pub const fn date_reported(mut self, at: DateTime<Utc>) -> Self {
        self.0.date_reported = Some(at);
        self
    }

    #[must_use]
    pub const fn date_resolved(mut self, at: DateTime<Utc>) -> Self {
        self.0.date_resolved = Some(at);
        self
    }

    #[must_use]
    pub const fn follow_up_date(mut self, at: DateTime<Utc>) -> Self {
        self.0.follow_up_date = Some(at);
        self
    }

    #[must_use]
    pub fn actions_taken(mut self, actions: Vec<String>) -> Self {
        self.0.actions_taken = Some(actions);
        self
    }

    #[must_use]
    pub fn outcome_evaluation(mut self, text: impl Into<String>) -> Self {
        self.0.outcome_evaluation = Some(text.into());
        self
    }

    #[must_use]
    pub fn external_referral(mut self, required: bool, details: Option<String>) -> Self {
        self.0.requires_external_referral = Some(required);
        self.0.external_referral_details = details;
        self
    }

    #[must_use]
    pub fn parent_feedback(mut self, text: impl Into<String>) -> Self {
        self.0.parent_feedback = Some(text.into());
        self
    }

    #[must_use]
    pub fn build(self) -> InterventionDraft {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_overlays_only_set_fields() {
        let mut base = InterventionDraftBuilder::new()
            .title("Original")
            .description("Texto")
            .priority(Priority::Low)
            .build();
        let change = InterventionDraftBuilder::new()
            .status(InterventionStatus::Resolved)
            .outcome_evaluation("Se resolvió")
            .build();
        base.merge(change);
        assert_eq!(base.title.as_deref(), Some("Original"));
        assert_eq!(base.priority, Some(3));
        assert_eq!(base.status.as_deref(), Some("Resuelto"));
        assert_eq!(base.outcome_evaluation.as_deref(), Some("Se resolvió"));
    }

    #[test]
    fn mirrored_record_carries_no_origin_status() {
        let record: Intervention = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Ausencias",
            "type": "Asistencia",
            "status": "Resuelto",
            "priority": 2
        }))
        .unwrap();
        let draft = InterventionDraft::from_intervention(&record);
        assert_eq!(draft.status.as_deref(), Some("Resuelto"));
        assert_eq!(draft.current_status, None);
    }

    #[test]
    fn deserializes_partial_json_form() {
        let draft: InterventionDraft =
            serde_json::from_str(r#"{"title": "Ausencias", "type": "Asistencia", "priority": 2}"#)
                .unwrap();
        assert_eq!(draft.intervention_type.as_deref(), Some("Asistencia"));
        assert_eq!(draft.priority, Some(2));
        assert_eq!(draft.status, None);
    }
}
