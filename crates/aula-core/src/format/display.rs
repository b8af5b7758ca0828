use serde::Serialize;

use super::{format_date, format_datetime};
use crate::entities::{CommentRecord, InterventionDetails, RecordId, StudentSummary, UserSummary};
use crate::enums::{InterventionScope, InterventionStatus, InterventionType, Priority};
use crate::rut;

/// An intervention shaped for a detail view: labels resolved, dates
/// formatted, relations flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionDisplay {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub intervention_type: InterventionType,
    pub status: InterventionStatus,
    pub priority: Priority,
    pub intervention_scope: InterventionScope,
    pub requires_external_referral: bool,
    pub external_referral_details: Option<String>,
    pub actions_taken: Vec<String>,
    pub outcome_evaluation: Option<String>,
    pub parent_feedback: Option<String>,
    pub date_reported: String,
    pub date_resolved: String,
    pub follow_up_date: String,
    pub created_at: String,
    pub updated_at: String,
    pub status_label: &'static str,
    pub priority_label: &'static str,
    pub type_label: &'static str,
    pub scope_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Relations>,
}

/// Related records, present when the display was built with relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relations {
    pub student: Option<StudentRef>,
    pub responsible: Option<UserRef>,
    pub informer: Option<UserRef>,
    pub comments: Vec<CommentDisplay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub id: RecordId,
    pub full_name: String,
    pub grade: Option<String>,
    pub rut: Option<String>,
}

impl From<&StudentSummary> for StudentRef {
    fn from(student: &StudentSummary) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name(),
            grade: student.grade.clone(),
            rut: student.rut.as_deref().map(rut::format_display),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: RecordId,
    pub full_name: String,
    pub role_label: Option<&'static str>,
    pub email: Option<String>,
}

impl From<&UserSummary> for UserRef {
    fn from(user: &UserSummary) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name(),
            role_label: user.role.map(crate::enums::Role::label),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDisplay {
    pub id: RecordId,
    pub content: String,
    pub created_at: String,
    pub author: Option<UserRef>,
}

impl From<&CommentRecord> for CommentDisplay {
    fn from(record: &CommentRecord) -> Self {
        Self {
            id: record.comment.id,
            content: record.comment.content.clone(),
            created_at: record.formatted_date.clone(),
            author: record.comment.user.as_ref().map(UserRef::from),
        }
    }
}

/// Shape `details` for display, optionally with relations and comments.
#[must_use]
pub fn format_intervention_for_display(
    details: &InterventionDetails,
    include_relations: bool,
) -> InterventionDisplay {
    let i = details.intervention();
    let relations = include_relations.then(|| Relations {
        student: i.student.as_ref().map(StudentRef::from),
        responsible: i.responsible.as_ref().map(UserRef::from),
        informer: i.informer.as_ref().map(UserRef::from),
        comments: details.comments.iter().map(CommentDisplay::from).collect(),
    });
    InterventionDisplay {
        id: i.id,
        title: i.title.clone(),
        description: i.description.clone(),
        intervention_type: i.intervention_type,
        status: i.status,
        priority: i.priority,
        intervention_scope: i.intervention_scope,
        requires_external_referral: i.requires_external_referral,
        external_referral_details: i.external_referral_details.clone(),
        actions_taken: i.actions_taken.clone(),
        outcome_evaluation: i.outcome_evaluation.clone(),
        parent_feedback: i.parent_feedback.clone(),
        date_reported: format_date(i.date_reported),
        date_resolved: format_date(i.date_resolved),
        follow_up_date: format_date(i.follow_up_date),
        created_at: format_datetime(i.created_at),
        updated_at: format_datetime(i.updated_at),
        status_label: i.status.label(),
        priority_label: i.priority.label(),
        type_label: i.intervention_type.as_str(),
        scope_label: i.intervention_scope.as_str(),
        relations,
    }
}
