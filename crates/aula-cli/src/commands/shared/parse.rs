use std::fmt::Display;
use std::str::FromStr;

use aula_core::timestamps::{end_of_day, parse_timestamp};
use chrono::{DateTime, NaiveDate, Utc};

/// Parse a wire value (`"En Proceso"`, `"profesor"`, `"2"`) through the
/// type's `FromStr`.
pub fn parse_value<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_optional<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map(|raw| parse_value(raw, field)).transpose()
}

/// A calendar day in `YYYY-MM-DD`.
pub fn parse_day(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_optional_day(raw: Option<&str>, field: &str) -> anyhow::Result<Option<NaiveDate>> {
    raw.map(|raw| parse_day(raw, field)).transpose()
}

/// A follow-up instant. A bare day means the end of that day, so today's
/// date is still in the future.
pub fn parse_follow_up(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(day) = parse_day(raw, "followUpDate") {
        return Ok(end_of_day(day));
    }
    parse_timestamp(raw.trim())
        .ok_or_else(|| anyhow::anyhow!("invalid followUpDate '{raw}': expected YYYY-MM-DD or RFC 3339"))
}
