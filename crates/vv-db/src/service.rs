//! Service layer orchestrating store operations under a session context.
//!
//! `VvService` wraps `VvDb` (raw database access), the content policy
//! (comment moderation mode, featured limit), and the caller's session
//! identity. All repo methods are implemented as `impl VvService` blocks.
//!
//! The session is explicit: callers construct a service for the identity
//! performing the operations (or none, for anonymous visitors), and every
//! gated method checks that identity fail-closed before reading or writing
//! any protected data.

use vv_config::{ContentConfig, VvConfig};
use vv_core::access::{self, Action};
use vv_core::identity::Identity;

use crate::VvDb;
use crate::error::StoreError;

/// Orchestrates entity-store mutations and queries for one session context.
pub struct VvService {
    db: VvDb,
    policy: ContentConfig,
    session: Option<Identity>,
}

impl VvService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"` for tests.
    /// * `policy` — Content policy (comment moderation mode, featured limit).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, policy: ContentConfig) -> Result<Self, StoreError> {
        let db = VvDb::open_local(db_path).await?;
        Ok(Self {
            db,
            policy,
            session: None,
        })
    }

    /// Create a service backed by a synced Turso embedded replica, using the
    /// loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotConfigured` when the Turso section is missing
    /// its URL or token, `StoreError` if the replica cannot be opened.
    pub async fn new_synced(config: &VvConfig) -> Result<Self, StoreError> {
        if !config.turso.is_configured() {
            return Err(StoreError::NotConfigured(
                "set turso.url and turso.auth_token (VV_TURSO__URL / VV_TURSO__AUTH_TOKEN)".into(),
            ));
        }
        let replica_path = if config.turso.has_local_replica() {
            config.turso.local_replica_path.as_str()
        } else {
            "voices-replica.db"
        };
        let db = VvDb::open_synced(replica_path, &config.turso.url, &config.turso.auth_token)
            .await?;
        Ok(Self {
            db,
            policy: config.content.clone(),
            session: None,
        })
    }

    /// Create from an existing `VvDb` (for testing).
    #[must_use]
    pub fn from_db(db: VvDb, policy: ContentConfig, session: Option<Identity>) -> Self {
        Self {
            db,
            policy,
            session,
        }
    }

    /// Attach a session identity, consuming the service.
    ///
    /// Used when a visitor signs in mid-session: the presentation layer
    /// rebuilds its service around the new identity.
    #[must_use]
    pub fn with_session(mut self, identity: Identity) -> Self {
        self.session = Some(identity);
        self
    }

    /// Drop the session identity (sign-out).
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &VvDb {
        &self.db
    }

    /// The caller's session identity, if signed in.
    #[must_use]
    pub const fn session(&self) -> Option<&Identity> {
        self.session.as_ref()
    }

    /// The active content policy.
    #[must_use]
    pub const fn policy(&self) -> &ContentConfig {
        &self.policy
    }

    /// Sync the underlying database with remote cloud state.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the sync fails.
    pub async fn sync(&self) -> Result<(), StoreError> {
        self.db.sync().await
    }

    /// Fail-closed capability check for gated operations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` when the session role (or lack of
    /// one) does not permit `action`. Nothing is read or written first.
    pub(crate) fn require(&self, action: Action) -> Result<(), StoreError> {
        let role = self.session.as_ref().map(|s| s.role);
        if access::authorize(role, action) {
            return Ok(());
        }
        tracing::warn!(
            action = action.as_str(),
            role = role.map_or("anonymous", vv_core::enums::Role::as_str),
            "access denied"
        );
        Err(StoreError::AccessDenied {
            action: action.as_str(),
            required: action
                .required_role()
                .map_or("(none)", vv_core::enums::Role::as_str),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vv_core::enums::Role;

    fn admin_identity() -> Identity {
        Identity {
            uid: "user_admin".into(),
            email: "admin@voicesandviewpoints.com".into(),
            name: "Admin".into(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn service_new_local() {
        let svc = VvService::new_local(":memory:", ContentConfig::default())
            .await
            .unwrap();
        assert!(svc.session().is_none());
        assert!(svc.policy().auto_approve_comments);
    }

    #[tokio::test]
    async fn new_synced_requires_configuration() {
        let config = VvConfig::default();
        let result = VvService::new_synced(&config).await;
        assert!(matches!(result, Err(StoreError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn require_is_fail_closed_for_anonymous() {
        let svc = VvService::new_local(":memory:", ContentConfig::default())
            .await
            .unwrap();
        let result = svc.require(Action::ApproveApplication);
        assert!(matches!(result, Err(StoreError::AccessDenied { .. })));
        assert!(svc.require(Action::SubmitComment).is_ok());
    }

    #[tokio::test]
    async fn require_passes_for_admin_session() {
        let svc = VvService::new_local(":memory:", ContentConfig::default())
            .await
            .unwrap()
            .with_session(admin_identity());
        assert!(svc.require(Action::ApproveApplication).is_ok());
        assert!(svc.require(Action::ModerateComment).is_ok());
    }

    #[tokio::test]
    async fn clear_session_revokes_capabilities() {
        let mut svc = VvService::new_local(":memory:", ContentConfig::default())
            .await
            .unwrap()
            .with_session(admin_identity());
        assert!(svc.require(Action::DeleteComment).is_ok());
        svc.clear_session();
        assert!(matches!(
            svc.require(Action::DeleteComment),
            Err(StoreError::AccessDenied { .. })
        ));
    }
}
