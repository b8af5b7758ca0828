use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RecordId, full_name, null_as_default};
use crate::enums::Role;
use crate::rut;
use crate::timestamps;

/// A staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    pub rut: Option<String>,
    pub role: Role,
    pub staff_type: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role),
        }
    }
}

/// Embedded user relation on interventions and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UserSummary {
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// A user as returned by the user service, with derived display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    pub full_name: String,
    pub display_rut: Option<String>,
    pub role_label: &'static str,
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            display_rut: user.rut.as_deref().map(rut::format_display),
            role_label: user.role.label(),
            user,
        }
    }
}

const fn default_true() -> bool {
    true
}
