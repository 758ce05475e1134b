//! User profile repository — the stored role assignment behind role
//! resolution.
//!
//! Profiles are upserted at sign-in; the role column is only ever changed by
//! explicit assignment (admin action or application approval), never by a
//! routine sign-in refresh.

use chrono::Utc;

use vv_core::access::Action;
use vv_core::entities::UserProfile;
use vv_core::enums::Role;

use crate::error::StoreError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::VvService;

const SELECT_COLS: &str = "uid, email, name, role, created_at";

fn row_to_profile(row: &libsql::Row) -> Result<UserProfile, StoreError> {
    Ok(UserProfile {
        uid: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl VvService {
    /// Create or refresh a profile at sign-in.
    ///
    /// A new profile gets `initial_role`; an existing profile keeps its
    /// stored role and only refreshes email and display name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub async fn upsert_user_profile(
        &self,
        uid: &str,
        email: &str,
        name: &str,
        initial_role: Role,
    ) -> Result<UserProfile, StoreError> {
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO users (uid, email, name, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(uid) DO UPDATE SET email = excluded.email, name = excluded.name",
                libsql::params![uid, email, name, initial_role.as_str(), now.to_rfc3339()],
            )
            .await?;
        self.get_user_profile(uid).await
    }

    /// Fetch a profile.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no profile has this uid.
    pub async fn get_user_profile(&self, uid: &str) -> Result<UserProfile, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE uid = ?1"),
                [uid],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::NotFound {
            entity: "user",
            id: uid.to_string(),
        })?;
        row_to_profile(&row)
    }

    /// The stored role for a uid, or `None` when no profile exists yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn get_user_role(&self, uid: &str) -> Result<Option<Role>, StoreError> {
        match self.get_user_profile(uid).await {
            Ok(profile) => Ok(Some(profile.role)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Explicit role assignment.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown uid,
    /// `StoreError::AccessDenied` for non-admin sessions.
    pub async fn set_user_role(&self, uid: &str, role: Role) -> Result<UserProfile, StoreError> {
        self.require(Action::ManageAuthors)?;
        let updated = self
            .db()
            .conn()
            .execute(
                "UPDATE users SET role = ?1 WHERE uid = ?2",
                libsql::params![role.as_str(), uid],
            )
            .await?;
        if updated == 0 {
            return Err(StoreError::NotFound {
                entity: "user",
                id: uid.to_string(),
            });
        }
        tracing::info!(uid, role = role.as_str(), "user role assigned");
        self.get_user_profile(uid).await
    }
}
