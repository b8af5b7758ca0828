//! Student draft and builder.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::StudentType;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub rut: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub student_type: Option<String>,
    pub academic_year: Option<i32>,
    pub enrollment_date: Option<NaiveDate>,
    pub has_scholarship: Option<bool>,
    pub scholarship_details: Option<String>,
    pub guardian1_name: Option<String>,
    pub guardian1_contact: Option<String>,
    pub guardian2_name: Option<String>,
    pub guardian2_contact: Option<String>,
    pub address: Option<String>,
    pub health_info: Option<String>,
    pub medical_conditions: Option<String>,
    pub allergies: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default)]
pub struct StudentDraftBuilder(StudentDraft);

impl StudentDraftBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.0.first_name = Some(first.into());
        self.0.last_name = Some(last.into());
        self
    }

    #[must_use]
    pub fn rut(mut self, rut: impl Into<String>) -> Self {
        self.0.rut = Some(rut.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.0.email = Some(email.into());
        self
    }

    #[must_use]
    pub const fn birth_date(mut self, date: NaiveDate) -> Self {
        self.0.birth_date = Some(date);
        self
    }

    #[must_use]
    pub fn grade(mut self, grade: impl Into<String>) -> Self {
        self.0.grade = Some(grade.into());
        self
    }

    #[must_use]
    pub fn student_type(mut self, kind: StudentType) -> Self {
        self.0.student_type = Some(kind.as_str().to_string());
        self
    }

    #[must_use]
    pub const fn academic_year(mut self, year: i32) -> Self {
        self.0.academic_year = Some(year);
        self
    }

    #[must_use]
    pub fn guardian1(mut self, name: impl Into<String>, contact: impl Into<String>) -> Self {
        self.0.guardian1_name = Some(name.into());
        self.0.guardian1_contact = Some(contact.into());
        self
    }

    #[must_use]
    pub fn guardian2(mut self, name: impl Into<String>, contact: impl Into<String>) -> Self {
        self.0.guardian2_name = Some(name.into());
        self.0.guardian2_contact = Some(contact.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.0.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn health_info(mut self, text: impl Into<String>) -> Self {
        self.0.health_info = Some(text.into());
        self
    }

    #[must_use]
    pub fn scholarship(mut self, details: Option<String>) -> Self {
        self.0.has_scholarship = Some(details.is_some());
        self.0.scholarship_details = details;
        self
    }

    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.0.is_active = Some(active);
        self
    }

    #[must_use]
    pub fn build(self) -> StudentDraft {
        self.0
    }
}
