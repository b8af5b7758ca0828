//! Form input for create and update operations.
//!
//! Drafts are loosely typed on purpose: enum-valued fields hold the raw
//! strings the user typed so validation can report unknown values per field
//! instead of failing to parse the whole form. Each draft comes with a
//! builder and converts into a strictly typed wire payload in
//! [`crate::format`] once validation passes.

mod comment;
mod intervention;
mod student;
mod user;

pub use comment::CommentDraft;
pub use intervention::{InterventionDraft, InterventionDraftBuilder};
pub use student::{StudentDraft, StudentDraftBuilder};
pub use user::{UserDraft, UserDraftBuilder};
