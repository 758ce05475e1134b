//! Role/action capability model.
//!
//! Every state-mutating operation maps to an [`Action`]; [`authorize`] decides
//! whether a caller (possibly anonymous) may perform it. Gated surfaces are
//! fail-closed: an unauthorized caller gets a uniform denied result before any
//! protected data is read.

use crate::enums::Role;

/// Actions subject to capability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreatePost,
    EditPost,
    DeletePost,
    ViewAdminDashboard,
    ManageAuthors,
    ApproveApplication,
    RejectApplication,
    ModerateComment,
    DeleteComment,
    SubmitComment,
    SubmitApplication,
}

impl Action {
    /// Minimum role required, or `None` when anonymous callers are allowed.
    #[must_use]
    pub const fn required_role(self) -> Option<Role> {
        match self {
            Self::CreatePost | Self::EditPost | Self::DeletePost => Some(Role::Author),
            Self::ViewAdminDashboard
            | Self::ManageAuthors
            | Self::ApproveApplication
            | Self::RejectApplication
            | Self::ModerateComment
            | Self::DeleteComment => Some(Role::Admin),
            Self::SubmitComment | Self::SubmitApplication => None,
        }
    }

    /// Stable name for logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatePost => "create_post",
            Self::EditPost => "edit_post",
            Self::DeletePost => "delete_post",
            Self::ViewAdminDashboard => "view_admin_dashboard",
            Self::ManageAuthors => "manage_authors",
            Self::ApproveApplication => "approve_application",
            Self::RejectApplication => "reject_application",
            Self::ModerateComment => "moderate_comment",
            Self::DeleteComment => "delete_comment",
            Self::SubmitComment => "submit_comment",
            Self::SubmitApplication => "submit_application",
        }
    }
}

/// Whether a caller holding `role` (or no session at all) may perform `action`.
///
/// Roles are ranked, so an admin passes every author-level check.
#[must_use]
pub fn authorize(role: Option<Role>, action: Action) -> bool {
    match action.required_role() {
        None => true,
        Some(required) => role.is_some_and(|r| r >= required),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_may_submit_but_not_mutate() {
        assert!(authorize(None, Action::SubmitComment));
        assert!(authorize(None, Action::SubmitApplication));
        assert!(!authorize(None, Action::CreatePost));
        assert!(!authorize(None, Action::ModerateComment));
    }

    #[test]
    fn plain_user_cannot_write_posts() {
        assert!(!authorize(Some(Role::User), Action::CreatePost));
        assert!(authorize(Some(Role::User), Action::SubmitComment));
    }

    #[test]
    fn author_writes_posts_but_does_not_moderate() {
        assert!(authorize(Some(Role::Author), Action::CreatePost));
        assert!(authorize(Some(Role::Author), Action::DeletePost));
        assert!(!authorize(Some(Role::Author), Action::ApproveApplication));
        assert!(!authorize(Some(Role::Author), Action::ViewAdminDashboard));
    }

    #[test]
    fn admin_holds_every_capability() {
        for action in [
            Action::CreatePost,
            Action::EditPost,
            Action::DeletePost,
            Action::ViewAdminDashboard,
            Action::ManageAuthors,
            Action::ApproveApplication,
            Action::RejectApplication,
            Action::ModerateComment,
            Action::DeleteComment,
            Action::SubmitComment,
            Action::SubmitApplication,
        ] {
            assert!(authorize(Some(Role::Admin), action), "{action:?}");
        }
    }
}
