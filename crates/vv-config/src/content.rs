//! Content policy configuration.

use serde::{Deserialize, Serialize};

/// Default featured-post count on the home page.
const fn default_featured_limit() -> u32 {
    6
}

/// Comments publish instantly unless configured otherwise.
const fn default_auto_approve() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    /// When true, new comments are created `approved` (instant publish);
    /// when false they start `pending` and wait for moderation.
    #[serde(default = "default_auto_approve")]
    pub auto_approve_comments: bool,

    /// Default result count for the featured-posts listing.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            auto_approve_comments: default_auto_approve(),
            featured_limit: default_featured_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ContentConfig::default();
        assert!(config.auto_approve_comments);
        assert_eq!(config.featured_limit, 6);
    }
}
