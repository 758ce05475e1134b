//! Admin allowlist configuration.

use serde::{Deserialize, Serialize};

/// Emails granted the `admin` role at sign-in when no stored profile says
/// otherwise. Comparison is case-insensitive.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub emails: Vec<String>,
}

impl AdminConfig {
    /// Whether `email` is on the allowlist.
    #[must_use]
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e.eq_ignore_ascii_case(email))
    }
}
