//! Backend endpoint paths, relative to the configured base URL.

use aula_core::entities::RecordId;

pub const LOGIN: &str = "/auth/login";
pub const LOGOUT: &str = "/auth/logout";
pub const PROFILE: &str = "/profile";

pub const INTERVENTIONS: &str = "/interventions";
pub const COMMENTS: &str = "/intervention-comments";
pub const STUDENTS: &str = "/students";
pub const USERS: &str = "/users";

#[must_use]
pub fn intervention(id: RecordId) -> String {
    format!("{INTERVENTIONS}/{id}")
}

#[must_use]
pub fn intervention_details(id: RecordId) -> String {
    format!("{INTERVENTIONS}/{id}/details")
}

#[must_use]
pub fn comment(id: RecordId) -> String {
    format!("{COMMENTS}/{id}")
}

#[must_use]
pub fn student(id: RecordId) -> String {
    format!("{STUDENTS}/{id}")
}

#[must_use]
pub fn student_with_interventions(id: RecordId) -> String {
    format!("{STUDENTS}/{id}/with-interventions")
}

#[must_use]
pub fn user(id: RecordId) -> String {
    format!("{USERS}/{id}")
}
