//! Display formatting and wire payload normalisation.
//!
//! Display dates use the Chilean short form (`dd-mm-yyyy`, with
//! `, HH:MM` when a time is wanted) rendered in UTC. Missing dates render as
//! an empty string.

mod display;
mod payload;

pub use display::{
    CommentDisplay, InterventionDisplay, Relations, StudentRef, UserRef,
    format_intervention_for_display,
};
pub use payload::{CommentPayload, InterventionPayload, StudentPayload, UserPayload};

use chrono::{DateTime, NaiveDate, Utc};

const DATE: &str = "%d-%m-%Y";
const DATE_TIME: &str = "%d-%m-%Y, %H:%M";

/// `dd-mm-yyyy`, or empty for `None`.
#[must_use]
pub fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|dt| dt.format(DATE).to_string()).unwrap_or_default()
}

/// `dd-mm-yyyy, HH:MM`, or empty for `None`.
#[must_use]
pub fn format_datetime(at: Option<DateTime<Utc>>) -> String {
    at.map(|dt| dt.format(DATE_TIME).to_string())
        .unwrap_or_default()
}

/// Calendar-date variant of [`format_date`].
#[must_use]
pub fn format_naive_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE).to_string()).unwrap_or_default()
}

/// Priority label for a raw numeric priority. Unknown values read
/// "No definida".
#[must_use]
pub fn priority_label(priority: Option<i64>) -> &'static str {
    priority
        .and_then(crate::enums::Priority::from_number)
        .map_or("No definida", crate::enums::Priority::label)
}
