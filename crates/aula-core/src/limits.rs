//! Character limits enforced on free-text fields.
//!
//! Lengths are counted in Unicode scalar values, not bytes.

pub const TITLE: usize = 100;
pub const DESCRIPTION: usize = 2000;
pub const COMMENT: usize = 1000;
pub const REFERRAL_DETAILS: usize = 500;
pub const ACTION_TAKEN: usize = 500;
pub const OUTCOME_EVALUATION: usize = 1000;

/// Student record limits.
pub mod student {
    pub const NAME: usize = 100;
    pub const EMAIL: usize = 100;
    pub const GUARDIAN_NAME: usize = 100;
    pub const GUARDIAN_CONTACT: usize = 20;
    pub const ADDRESS: usize = 255;
    pub const HEALTH_INFO: usize = 1000;
    pub const MEDICAL_CONDITIONS: usize = 500;
    pub const ALLERGIES: usize = 500;
    pub const SCHOLARSHIP_DETAILS: usize = 500;
    pub const MIN_AGE: i32 = 3;
    pub const MAX_AGE: i32 = 20;
}

/// Minimum password length for new staff accounts.
pub const PASSWORD_MIN: usize = 8;

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate `text` to at most `max` characters.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
