use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RecordId, UserSummary, null_as_default};
use crate::format;
use crate::timestamps;

/// A note attached to an intervention. Comments are owned by their
/// intervention and listed newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    pub intervention_id: Option<RecordId>,
    pub user_id: Option<RecordId>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamps::deserialize_optional")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

/// A comment with its display date resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    #[serde(flatten)]
    pub comment: Comment,
    pub formatted_date: String,
}

impl From<Comment> for CommentRecord {
    fn from(comment: Comment) -> Self {
        Self {
            formatted_date: format::format_datetime(comment.created_at),
            comment,
        }
    }
}
