//! Wire payloads sent to the backend on create and update.
//!
//! Payloads are built from drafts that already passed validation. Text is
//! trimmed and truncated to its limit, enums are strictly typed, and dates
//! serialize as RFC 3339.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::drafts::{CommentDraft, InterventionDraft, StudentDraft, UserDraft};
use crate::entities::RecordId;
use crate::enums::{InterventionScope, InterventionStatus, InterventionType, Priority, Role};
use crate::errors::CoreError;
use crate::limits::{self, truncate};
use crate::rut;
use crate::validation::{FieldErrors, Mode};

fn clip(text: Option<&str>, max: usize) -> String {
    text.map(|t| truncate(t.trim(), max)).unwrap_or_default()
}

fn clip_optional(text: Option<&str>, max: usize) -> Option<String> {
    Some(clip(text, max)).filter(|t| !t.is_empty())
}

fn trimmed(text: Option<&String>) -> Option<String> {
    text.map(|t| t.trim().to_string())
}

// ---------------------------------------------------------------------------
// Intervention
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionPayload {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub intervention_type: InterventionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InterventionStatus>,
    pub priority: Priority,
    pub intervention_scope: InterventionScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_reported: Option<DateTime<Utc>>,
    pub date_resolved: Option<DateTime<Utc>>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub actions_taken: Vec<String>,
    pub outcome_evaluation: Option<String>,
    pub parent_feedback: Option<String>,
    pub requires_external_referral: bool,
    pub external_referral_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informer_id: Option<RecordId>,
}

impl InterventionPayload {
    /// Normalise a validated draft.
    ///
    /// On [`Mode::Create`] a missing status defaults to Pendiente and a
    /// missing `dateReported` to `now`; on [`Mode::Update`] both are left out
    /// so the stored values stand. Missing or unknown scope becomes
    /// Individual. Referral details are dropped when no referral is required
    /// and blank actions are removed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if type or priority cannot be
    /// resolved, which only happens for drafts that skipped validation.
    pub fn from_draft(
        draft: &InterventionDraft,
        mode: Mode,
        now: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let mut errors = FieldErrors::new();
        let intervention_type = draft
            .intervention_type
            .as_deref()
            .and_then(|t| t.parse::<InterventionType>().ok());
        if intervention_type.is_none() {
            errors.set("type", "Tipo de intervención no válido");
        }
        let priority = draft.priority.and_then(Priority::from_number);
        if priority.is_none() {
            errors.set("priority", "Prioridad no válida");
        }
        let status = match draft.status.as_deref() {
            None if mode == Mode::Create => Some(InterventionStatus::Pending),
            None => None,
            Some(s) => match s.parse() {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.set("status", "Estado no válido");
                    None
                }
            },
        };
        let (Some(intervention_type), Some(priority)) = (intervention_type, priority) else {
            return Err(CoreError::Validation(errors));
        };
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        let requires_external_referral = draft.requires_external_referral.unwrap_or(false);
        Ok(Self {
            title: clip(draft.title.as_deref(), limits::TITLE),
            description: clip(draft.description.as_deref(), limits::DESCRIPTION),
            intervention_type,
            status,
            priority,
            intervention_scope: draft
                .intervention_scope
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            date_reported: match mode {
                Mode::Create => Some(draft.date_reported.unwrap_or(now)),
                Mode::Update => draft.date_reported,
            },
            date_resolved: draft.date_resolved,
            follow_up_date: draft.follow_up_date,
            actions_taken: draft
                .actions_taken
                .iter()
                .flatten()
                .filter_map(|a| clip_optional(Some(a.as_str()), limits::ACTION_TAKEN))
                .collect(),
            outcome_evaluation: clip_optional(
                draft.outcome_evaluation.as_deref(),
                limits::OUTCOME_EVALUATION,
            ),
            parent_feedback: clip_optional(draft.parent_feedback.as_deref(), usize::MAX),
            requires_external_referral,
            external_referral_details: if requires_external_referral {
                clip_optional(
                    draft.external_referral_details.as_deref(),
                    limits::REFERRAL_DETAILS,
                )
            } else {
                None
            },
            student_id: draft.student_id,
            responsible_id: draft.responsible_id,
            informer_id: draft.informer_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
}

impl From<&CommentDraft> for CommentPayload {
    fn from(draft: &CommentDraft) -> Self {
        Self {
            content: clip(draft.content.as_deref(), limits::COMMENT),
            intervention_id: draft.intervention_id,
            user_id: draft.user_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

/// Student create/update body. Absent fields are omitted so updates stay
/// partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_scholarship: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian1_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian1_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian2_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian2_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl StudentPayload {
    /// Normalise a validated draft. New students are active unless the
    /// draft says otherwise.
    #[must_use]
    pub fn from_draft(draft: &StudentDraft, mode: Mode) -> Self {
        Self {
            first_name: trimmed(draft.first_name.as_ref()),
            last_name: trimmed(draft.last_name.as_ref()),
            rut: draft.rut.as_deref().map(rut::canonical),
            email: draft
                .email
                .as_deref()
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty()),
            birth_date: draft.birth_date,
            grade: trimmed(draft.grade.as_ref()),
            student_type: trimmed(draft.student_type.as_ref()),
            academic_year: draft.academic_year,
            enrollment_date: draft.enrollment_date,
            has_scholarship: draft.has_scholarship,
            scholarship_details: trimmed(draft.scholarship_details.as_ref()),
            guardian1_name: trimmed(draft.guardian1_name.as_ref()),
            guardian1_contact: trimmed(draft.guardian1_contact.as_ref()),
            guardian2_name: trimmed(draft.guardian2_name.as_ref()),
            guardian2_contact: trimmed(draft.guardian2_contact.as_ref()),
            address: trimmed(draft.address.as_ref()),
            health_info: trimmed(draft.health_info.as_ref()),
            medical_conditions: trimmed(draft.medical_conditions.as_ref()),
            allergies: trimmed(draft.allergies.as_ref()),
            is_active: match mode {
                Mode::Create => Some(draft.is_active.unwrap_or(true)),
                Mode::Update => draft.is_active,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Sent without separators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserPayload {
    #[must_use]
    pub fn from_draft(draft: &UserDraft, mode: Mode) -> Self {
        Self {
            first_name: trimmed(draft.first_name.as_ref()),
            last_name: trimmed(draft.last_name.as_ref()),
            email: draft.email.as_deref().map(|e| e.trim().to_lowercase()),
            rut: draft.rut.as_deref().map(rut::normalize),
            role: draft.role.as_deref().and_then(|r| r.parse().ok()),
            password: draft.password.clone(),
            staff_type: trimmed(draft.staff_type.as_ref()),
            department: trimmed(draft.department.as_ref()),
            phone: trimmed(draft.phone.as_ref()),
            is_active: match mode {
                Mode::Create => Some(draft.is_active.unwrap_or(true)),
                Mode::Update => draft.is_active,
            },
        }
    }

    /// Body that only toggles the active flag.
    #[must_use]
    pub fn active_flag(active: bool) -> Self {
        Self {
            is_active: Some(active),
            ..Self::default()
        }
    }
}
