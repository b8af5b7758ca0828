//! Intervention list filters, sorting, and paging.
//!
//! An [`InterventionFilter`] does double duty: it renders the query string
//! sent to the backend, and it refines an already-fetched list locally so a
//! backend that ignores some parameters still yields the right rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{InterventionRecord, RecordId};
use crate::enums::{InterventionStatus, InterventionType, Priority, Role, StudentType};
use crate::timestamps::{end_of_day, start_of_day};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterventionFilter {
    pub status: Option<InterventionStatus>,
    pub priority: Option<Priority>,
    pub student_id: Option<RecordId>,
    pub responsible_id: Option<RecordId>,
    #[serde(rename = "type")]
    pub intervention_type: Option<InterventionType>,
    /// Inclusive from the start of the day.
    pub date_from: Option<NaiveDate>,
    /// Inclusive through 23:59:59 of the day.
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive substring of the student's full name.
    pub student_search: Option<String>,
    /// Case-insensitive substring of the responsible's full name.
    pub responsible_search: Option<String>,
}

impl InterventionFilter {
    /// Query parameters for the backend list endpoint. Name searches are
    /// local-only and not sent.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            query.push(("priority", priority.to_string()));
        }
        if let Some(id) = self.student_id {
            query.push(("studentId", id.to_string()));
        }
        if let Some(id) = self.responsible_id {
            query.push(("responsibleId", id.to_string()));
        }
        if let Some(kind) = self.intervention_type {
            query.push(("type", kind.as_str().to_string()));
        }
        if let Some(from) = self.date_from {
            query.push(("dateFrom", from.to_string()));
        }
        if let Some(to) = self.date_to {
            query.push(("dateTo", to.to_string()));
        }
        query
    }

    /// Whether `record` satisfies every set criterion.
    ///
    /// Records without a report date are kept by the date bounds.
    #[must_use]
    pub fn matches(&self, record: &InterventionRecord) -> bool {
        let i = &record.intervention;
        if self.status.is_some_and(|s| s != i.status)
            || self.priority.is_some_and(|p| p != i.priority)
            || self.intervention_type.is_some_and(|t| t != i.intervention_type)
            || self.student_id.is_some_and(|id| i.student_id != Some(id))
            || self.responsible_id.is_some_and(|id| i.responsible_id != Some(id))
        {
            return false;
        }
        if let Some(reported) = i.date_reported {
            if self.date_from.is_some_and(|from| reported < start_of_day(from)) {
                return false;
            }
            if self.date_to.is_some_and(|to| reported > end_of_day(to)) {
                return false;
            }
        }
        if let Some(needle) = non_blank(self.student_search.as_deref()) {
            let name = i.student.as_ref().map(|s| s.full_name()).unwrap_or_default();
            if !contains_ignore_case(&name, needle) {
                return false;
            }
        }
        if let Some(needle) = non_blank(self.responsible_search.as_deref()) {
            let name = i
                .responsible
                .as_ref()
                .map(|u| u.full_name())
                .unwrap_or_default();
            if !contains_ignore_case(&name, needle) {
                return false;
            }
        }
        true
    }

    /// Keep only matching records, preserving order.
    #[must_use]
    pub fn apply(&self, records: Vec<InterventionRecord>) -> Vec<InterventionRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Query for the student list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub grade: Option<String>,
    pub student_type: Option<StudentType>,
    pub is_active: Option<bool>,
    pub order_by: Option<String>,
    /// Only sent with `order_by`; defaults to ascending.
    pub order: Option<SortOrder>,
}

impl StudentFilter {
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(search) = non_blank(self.search.as_deref()) {
            query.push(("search", search.to_string()));
        }
        if let Some(grade) = non_blank(self.grade.as_deref()) {
            query.push(("grade", grade.to_string()));
        }
        if let Some(kind) = self.student_type {
            query.push(("studentType", kind.as_str().to_string()));
        }
        if let Some(active) = self.is_active {
            query.push(("isActive", active.to_string()));
        }
        if let Some(order_by) = non_blank(self.order_by.as_deref()) {
            query.push(("orderBy", order_by.to_string()));
            let order = match self.order.unwrap_or(SortOrder::Asc) {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            };
            query.push(("order", order.to_string()));
        }
        query
    }
}

/// Query for the user list endpoint. `roles` repeats the `role` parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub roles: Vec<Role>,
    pub staff_type: Option<String>,
    pub is_active: Option<bool>,
    pub department: Option<String>,
}

impl UserFilter {
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(search) = non_blank(self.search.as_deref()) {
            query.push(("search", search.to_string()));
        }
        for role in &self.roles {
            query.push(("role", role.as_str().to_string()));
        }
        if let Some(staff_type) = non_blank(self.staff_type.as_deref()) {
            query.push(("staffType", staff_type.to_string()));
        }
        if let Some(active) = self.is_active {
            query.push(("isActive", active.to_string()));
        }
        if let Some(department) = non_blank(self.department.as_deref()) {
            query.push(("department", department.to_string()));
        }
        query
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Sorting and paging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    DateReported,
    Priority,
    Status,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Sort in place. Missing report dates sort before any date.
pub fn sort_interventions(records: &mut [InterventionRecord], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| {
        let (a, b) = (&a.intervention, &b.intervention);
        let ordering = match key {
            SortKey::DateReported => a.date_reported.cmp(&b.date_reported),
            SortKey::Priority => a.priority.cmp(&b.priority),
            SortKey::Status => a.status.cmp(&b.status),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        let directed = match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        directed.then_with(|| a.id.cmp(&b.id))
    });
}

/// One page of a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        if self.per_page == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page)
        }
    }
}

/// Slice out zero-based page `page` of `per_page` items.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let total = items.len();
    let start = page.saturating_mul(per_page).min(total);
    let items = items.into_iter().skip(start).take(per_page).collect();
    Page {
        items,
        page,
        per_page,
        total,
    }
}
