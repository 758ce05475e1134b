use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Category, PostStatus};

/// A blog post, draft or published.
///
/// Posts reference their author by id; `author_name` is a denormalized
/// display copy refreshed whenever the author is renamed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    pub category: Category,
    pub status: PostStatus,
    /// Set on the first transition into `published`; `None` while draft.
    pub published_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    /// Estimated read time in minutes, at least 1.
    pub read_time: u32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a post. Id, timestamps, and `author_name` are assigned
/// by the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author_id: String,
    pub category: Category,
    pub image_url: Option<String>,
    pub read_time: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}
