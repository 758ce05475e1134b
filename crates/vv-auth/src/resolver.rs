use vv_config::AdminConfig;
use vv_core::enums::Role;

/// Decides the effective role for a signed-in account.
///
/// The stored per-user role is authoritative when a profile exists. Without
/// one, accounts on the configured admin allowlist come up as `Admin` so a
/// fresh deployment is administrable before any profile rows exist; everyone
/// else starts as `User`.
#[derive(Debug, Clone)]
pub struct RoleResolver {
    admin: AdminConfig,
}

impl RoleResolver {
    #[must_use]
    pub const fn new(admin: AdminConfig) -> Self {
        Self { admin }
    }

    #[must_use]
    pub fn resolve(&self, stored: Option<Role>, email: &str) -> Role {
        if let Some(role) = stored {
            return role;
        }
        if self.admin.is_admin_email(email) {
            return Role::Admin;
        }
        Role::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolver() -> RoleResolver {
        RoleResolver::new(AdminConfig {
            emails: vec!["admin@voicesandviewpoints.com".into()],
        })
    }

    #[test]
    fn stored_role_wins_over_allowlist() {
        let r = resolver();
        assert_eq!(
            r.resolve(Some(Role::Author), "admin@voicesandviewpoints.com"),
            Role::Author
        );
    }

    #[test]
    fn allowlisted_email_without_profile_is_admin() {
        let r = resolver();
        assert_eq!(r.resolve(None, "admin@voicesandviewpoints.com"), Role::Admin);
        assert_eq!(r.resolve(None, "ADMIN@VoicesAndViewpoints.com"), Role::Admin);
    }

    #[test]
    fn everyone_else_starts_as_user() {
        let r = resolver();
        assert_eq!(r.resolve(None, "reader@example.com"), Role::User);
    }
}
