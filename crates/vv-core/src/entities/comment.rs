use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CommentStatus;

/// A reader comment on a post. Only `approved` comments are publicly visible.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    /// Display name as entered by the commenter; no account required.
    pub author: String,
    pub content: String,
    pub email: Option<String>,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}
