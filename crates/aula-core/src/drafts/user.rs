//! Staff user draft and builder.

use serde::{Deserialize, Serialize};

use crate::enums::Role;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub rut: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub staff_type: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default)]
pub struct UserDraftBuilder(UserDraft);

impl UserDraftBuilder {
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
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.0.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn rut(mut self, rut: impl Into<String>) -> Self {
        self.0.rut = Some(rut.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.0.role = Some(role.as_str().to_string());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.0.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.0.department = Some(department.into());
        self
    }

    #[must_use]
    pub const fn active(mut self, active: bool) -> Self {
        self.0.is_active = Some(active);
        self
    }

    #[must_use]
    pub fn build(self) -> UserDraft {
        self.0
    }
}
