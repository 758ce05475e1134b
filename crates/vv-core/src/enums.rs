//! Status enums, categories, roles, and notification kinds.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! except [`Category`] which serializes as its human-readable display name (the
//! store and the public site both use the display form). Status enums with state
//! machines provide `allowed_next_states()` to enforce valid transitions at the
//! application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PostStatus
// ---------------------------------------------------------------------------

/// Publication status of a post.
///
/// ```text
/// draft ⇄ published
/// ```
///
/// Both directions are explicit author actions: publishing a draft and
/// unpublishing a live post back to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Published],
            Self::Published => &[Self::Draft],
        }
    }

    /// Whether a transition from `self` to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApplicationStatus
// ---------------------------------------------------------------------------

/// Status of an author application through its review lifecycle.
///
/// ```text
/// pending → approved
///         → rejected
/// ```
///
/// `approved` and `rejected` are terminal: decisions are one-way and a decided
/// application can never be re-decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved | Self::Rejected => &[],
        }
    }

    /// Whether a transition from `self` to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether this is a terminal (decided) state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CommentStatus
// ---------------------------------------------------------------------------

/// Moderation status of a comment.
///
/// Unlike applications, moderation is non-terminal: an admin may move a
/// comment between any two states at any time (approve a rejected comment,
/// send an approved one back to pending, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Valid next states from the current state. Every other state is reachable.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::Pending, Self::Rejected],
            Self::Rejected => &[Self::Pending, Self::Approved],
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The fixed set of editorial categories.
///
/// Serialized as the display name ("Culture and Tourism"), which is the form
/// stored in post documents and shown on the site. `slug()` gives the URL form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Category {
    Art,
    Books,
    #[serde(rename = "Culture and Tourism")]
    CultureAndTourism,
    #[serde(rename = "Health and Nutrition")]
    HealthAndNutrition,
    Analysis,
    #[serde(rename = "Sustainability and Environment")]
    SustainabilityAndEnvironment,
}

impl Category {
    /// All categories, in site display order.
    pub const ALL: [Self; 6] = [
        Self::Art,
        Self::Books,
        Self::CultureAndTourism,
        Self::HealthAndNutrition,
        Self::Analysis,
        Self::SustainabilityAndEnvironment,
    ];

    /// Display name, also the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Art => "Art",
            Self::Books => "Books",
            Self::CultureAndTourism => "Culture and Tourism",
            Self::HealthAndNutrition => "Health and Nutrition",
            Self::Analysis => "Analysis",
            Self::SustainabilityAndEnvironment => "Sustainability and Environment",
        }
    }

    /// URL slug for category pages.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Art => "art",
            Self::Books => "books",
            Self::CultureAndTourism => "culture-and-tourism",
            Self::HealthAndNutrition => "health-and-nutrition",
            Self::Analysis => "analysis",
            Self::SustainabilityAndEnvironment => "sustainability-and-environment",
        }
    }

    /// Look up a category by its URL slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role assigned to an authenticated identity.
///
/// Roles are ranked: every capability of a lower role is held by the higher
/// ones (`user` < `author` < `admin`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Author,
    Admin,
}

impl Role {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Author => "author",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationKind
// ---------------------------------------------------------------------------

/// Kind of notification produced by the application lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ApplicationApproved,
    ApplicationRejected,
}

impl NotificationKind {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplicationApproved => "application_approved",
            Self::ApplicationRejected => "application_rejected",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn application_terminal_states_have_no_successors() {
        assert!(ApplicationStatus::Approved.allowed_next_states().is_empty());
        assert!(ApplicationStatus::Rejected.allowed_next_states().is_empty());
        assert!(!ApplicationStatus::Approved.can_transition_to(ApplicationStatus::Pending));
        assert!(!ApplicationStatus::Rejected.can_transition_to(ApplicationStatus::Approved));
    }

    #[test]
    fn application_pending_can_be_decided_either_way() {
        assert!(ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Approved));
        assert!(ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Rejected));
        assert!(!ApplicationStatus::Pending.is_terminal());
    }

    #[test]
    fn comment_moderation_is_non_terminal() {
        for from in [
            CommentStatus::Pending,
            CommentStatus::Approved,
            CommentStatus::Rejected,
        ] {
            assert_eq!(from.allowed_next_states().len(), 2);
        }
    }

    #[test]
    fn post_status_flips_both_ways() {
        assert!(PostStatus::Draft.can_transition_to(PostStatus::Published));
        assert!(PostStatus::Published.can_transition_to(PostStatus::Draft));
    }

    #[test]
    fn category_slug_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_slug(cat.slug()), Some(cat));
        }
        assert_eq!(Category::from_slug("cooking"), None);
    }

    #[test]
    fn category_serializes_as_display_name() {
        let json = serde_json::to_string(&Category::CultureAndTourism).unwrap();
        assert_eq!(json, "\"Culture and Tourism\"");
    }

    #[test]
    fn role_ranking() {
        assert!(Role::User < Role::Author);
        assert!(Role::Author < Role::Admin);
    }
}
