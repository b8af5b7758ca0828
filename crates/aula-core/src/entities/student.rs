use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{InterventionRecord, RecordId, full_name, null_as_default};
use crate::enums::StudentType;
use crate::rut;
use crate::timestamps;

/// A student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rut: String,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grade: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub student_type: StudentType,
    pub academic_year: Option<i32>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional_date")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_scholarship: bool,
    pub scholarship_details: Option<String>,
    pub guardian1_name: Option<String>,
    pub guardian1_contact: Option<String>,
    pub guardian2_name: Option<String>,
    pub guardian2_contact: Option<String>,
    pub address: Option<String>,
    pub health_info: Option<String>,
    pub medical_conditions: Option<String>,
    pub allergies: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Student {
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Embedded student relation on interventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl StudentSummary {
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// A student as returned by the student service, with derived display
/// fields and, when requested, the student's interventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(flatten)]
    pub student: Student,
    pub full_name: String,
    pub display_rut: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interventions: Option<Vec<InterventionRecord>>,
}

impl From<Student> for StudentRecord {
    fn from(student: Student) -> Self {
        Self {
            full_name: student.full_name(),
            display_rut: rut::format_display(&student.rut),
            interventions: None,
            student,
        }
    }
}

const fn default_true() -> bool {
    true
}
