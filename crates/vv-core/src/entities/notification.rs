use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::NotificationKind;

/// Structured payload attached to a notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NotificationData {
    pub application_id: Option<String>,
    pub author_id: Option<String>,
    pub reason: Option<String>,
}

/// A notification addressed to a user, produced by application decisions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    /// Provider uid of the recipient. Empty when the applicant submitted
    /// anonymously (the notification is then undeliverable).
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub data: NotificationData,
}
