//! Field-level validation primitives.
//!
//! Write paths validate input into a [`FieldErrors`] map before touching the
//! store; a non-empty map aborts the operation with no partial writes. Field
//! names match the submitting form's field names so callers can render errors
//! inline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Map of field name to human-readable error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Require `value` to contain non-whitespace content.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.insert(field, format!("{field} is required"));
        }
    }

    /// Require a plausible email address (non-empty, contains `@` with
    /// content on both sides). Full RFC validation is the provider's job.
    pub fn require_email(&mut self, field: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.insert(field, format!("{field} is required"));
            return;
        }
        let valid = value
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            self.insert(field, "a valid email address is required");
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn require_flags_blank_and_whitespace() {
        let mut errors = FieldErrors::new();
        errors.require("title", "");
        errors.require("excerpt", "   ");
        errors.require("content", "fine");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("title"), Some("title is required"));
        assert!(errors.get("content").is_none());
    }

    #[test]
    fn require_email_accepts_plausible_addresses() {
        let mut errors = FieldErrors::new();
        errors.require_email("email", "jo@x.com");
        assert!(errors.is_empty());
    }

    #[test]
    fn require_email_rejects_malformed_addresses() {
        for bad in ["", "not-an-email", "@x.com", "jo@nodot"] {
            let mut errors = FieldErrors::new();
            errors.require_email("email", bad);
            assert_eq!(errors.len(), 1, "expected rejection for {bad:?}");
        }
    }

    #[test]
    fn display_joins_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.insert("b", "second");
        errors.insert("a", "first");
        assert_eq!(errors.to_string(), "a: first; b: second");
    }
}
