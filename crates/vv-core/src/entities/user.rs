use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Per-user record holding the explicit role assignment.
///
/// The role lives here rather than in a hardcoded email comparison; it is
/// set at account creation, elevated to `author` on application approval,
/// and editable by admins.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserProfile {
    /// Provider uid, also the primary key.
    pub uid: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
