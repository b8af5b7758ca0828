use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentRecord, RecordId, StudentSummary, UserSummary, null_as_default};
use crate::enums::{InterventionScope, InterventionStatus, InterventionType, Priority};
use crate::timestamps;

/// A case record documenting a concern about a student and its resolution.
///
/// Comments are not part of this struct; they travel alongside it in
/// [`InterventionDetails`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "type")]
    pub intervention_type: InterventionType,
    pub status: InterventionStatus,
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intervention_scope: InterventionScope,
    pub student_id: Option<RecordId>,
    pub responsible_id: Option<RecordId>,
    pub informer_id: Option<RecordId>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub date_reported: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub date_resolved: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub follow_up_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions_taken: Vec<String>,
    pub outcome_evaluation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requires_external_referral: bool,
    pub external_referral_details: Option<String>,
    pub parent_feedback: Option<String>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<UserSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub informer: Option<UserSummary>,
}

impl Intervention {
    /// Pending and in-progress interventions are active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// An intervention with the derived labels every listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionRecord {
    #[serde(flatten)]
    pub intervention: Intervention,
    pub status_label: &'static str,
    pub priority_label: &'static str,
    pub is_active: bool,
}

impl From<Intervention> for InterventionRecord {
    fn from(intervention: Intervention) -> Self {
        Self {
            status_label: intervention.status.label(),
            priority_label: intervention.priority.label(),
            is_active: intervention.is_active(),
            intervention,
        }
    }
}

/// An intervention with its relations and comments, newest comment first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionDetails {
    #[serde(flatten)]
    pub record: InterventionRecord,
    pub comments: Vec<CommentRecord>,
}

impl InterventionDetails {
    #[must_use]
    pub const fn intervention(&self) -> &Intervention {
        &self.record.intervention
    }

    /// Swap in a fresh copy of the intervention, keeping the comments.
    pub fn replace_intervention(&mut self, intervention: Intervention) {
        self.record = InterventionRecord::from(intervention);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BACKEND_ROW: &str = r#"{
        "id": 42,
        "title": "Conflicto en recreo",
        "description": "Pelea entre estudiantes durante el recreo",
        "type": "Comportamiento",
        "status": "En Proceso",
        "priority": "1",
        "interventionScope": null,
        "studentId": 3,
        "responsibleId": 5,
        "informerId": 9,
        "dateReported": "2024-01-15T10:00:00.000Z",
        "dateResolved": null,
        "actionsTaken": null,
        "requiresExternalReferral": null,
        "createdAt": "2024-01-15T10:00:00.000Z",
        "student": {"id": 3, "firstName": "Pedro", "lastName": "Díaz", "rut": "12345678-5"}
    }"#;

    #[test]
    fn deserializes_lenient_backend_row() {
        let intervention: Intervention = serde_json::from_str(BACKEND_ROW).unwrap();
        assert_eq!(intervention.priority, Priority::High);
        assert_eq!(intervention.intervention_scope, InterventionScope::Individual);
        assert!(intervention.actions_taken.is_empty());
        assert!(!intervention.requires_external_referral);
        assert_eq!(intervention.date_resolved, None);
        assert_eq!(
            intervention.student.as_ref().map(StudentSummary::full_name),
            Some("Pedro Díaz".to_string())
        );
    }

    #[test]
    fn record_derives_labels_and_activity() {
        let intervention: Intervention = serde_json::from_str(BACKEND_ROW).unwrap();
        let record = InterventionRecord::from(intervention);
        assert_eq!(record.status_label, "En Proceso");
        assert_eq!(record.priority_label, "Alta");
        assert!(record.is_active);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["statusLabel"], "En Proceso");
        assert_eq!(json["priority"], 1);
        assert_eq!(json["type"], "Comportamiento");
    }

    #[test]
    fn unknown_status_fails_to_deserialize() {
        let row = BACKEND_ROW.replace("En Proceso", "Archivado");
        assert!(serde_json::from_str::<Intervention>(&row).is_err());
    }
}
