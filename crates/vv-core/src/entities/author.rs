use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Optional social links shown on an author's public profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SocialLinks {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.twitter.is_none() && self.linkedin.is_none() && self.website.is_none()
    }
}

/// A writer with publishing rights.
///
/// Created directly by an admin or as a side effect of approving an
/// [`AuthorApplication`](super::AuthorApplication).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub expertise: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub social_links: SocialLinks,
    /// Count of posts referencing this author. Maintained by the store.
    pub posts_count: u32,
    pub joined_at: DateTime<Utc>,
}
