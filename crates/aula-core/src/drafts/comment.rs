use serde::{Deserialize, Serialize};

use crate::entities::RecordId;

/// Content of a new or edited comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentDraft {
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
}

impl CommentDraft {
    #[must_use]
    pub fn new(intervention_id: RecordId, user_id: RecordId, content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            intervention_id: Some(intervention_id),
            user_id: Some(user_id),
        }
    }

    /// An edit only carries new content.
    #[must_use]
    pub fn edit(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}
