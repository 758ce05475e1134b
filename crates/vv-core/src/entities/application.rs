use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ApplicationStatus, Category};

/// An application to become an author.
///
/// Decisions are one-way: once `approved` or `rejected` the record is
/// immutable apart from deletion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthorApplication {
    pub id: String,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub writing_experience: String,
    /// At least one category the applicant wants to write in.
    pub preferred_categories: Vec<Category>,
    pub sample_title: String,
    pub sample_excerpt: String,
    pub motivation: Option<String>,
    /// Provider uid of the applicant's session, if they were signed in.
    /// `None` means decision notifications have no deliverable address.
    pub user_id: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    /// Set on approval to the created author's id.
    pub author_id: Option<String>,
}

/// Input for submitting an application. Id, status, and `submitted_at` are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub writing_experience: String,
    #[serde(default)]
    pub preferred_categories: Vec<Category>,
    pub sample_title: String,
    pub sample_excerpt: String,
    pub motivation: Option<String>,
    pub user_id: Option<String>,
}
