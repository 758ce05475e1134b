//! # vv-db
//!
//! libSQL entity store and content lifecycle engine for Voices and Viewpoints.
//!
//! Handles all persisted state: posts, authors, comments, author applications,
//! notifications, newsletter subscribers, and user role records. Uses libSQL
//! embedded replicas with Turso Cloud sync in production and local/in-memory
//! databases in tests.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
pub(crate) mod test_support;

use error::StoreError;
use libsql::Builder;

/// Central database handle for all store operations.
///
/// Wraps a libSQL database and connection. Provides prefixed ID generation;
/// repository methods live on [`service::VvService`].
pub struct VvDb {
    db: libsql::Database,
    conn: libsql::Connection,
    synced: bool,
}

impl VvDb {
    /// Open a local-only database at the given path (no cloud sync).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let vv_db = Self {
            db,
            conn,
            synced: false,
        };
        vv_db.run_migrations().await?;
        Ok(vv_db)
    }

    /// Open a Turso embedded replica synced against a remote database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the replica cannot be opened or migrations fail.
    pub async fn open_synced(
        local_replica_path: &str,
        remote_url: &str,
        auth_token: &str,
    ) -> Result<Self, StoreError> {
        let db = Builder::new_remote_replica(
            local_replica_path,
            remote_url.to_string(),
            auth_token.to_string(),
        )
        .build()
        .await?;
        let conn = db.connect()?;

        let vv_db = Self {
            db,
            conn,
            synced: true,
        };
        vv_db.run_migrations().await?;
        Ok(vv_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle is backed by a synced Turso replica.
    #[must_use]
    pub const fn is_synced_replica(&self) -> bool {
        self.synced
    }

    /// Sync the embedded replica with remote cloud state. No-op for local
    /// databases.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the sync fails.
    pub async fn sync(&self) -> Result<(), StoreError> {
        if self.synced {
            self.db.sync().await?;
        }
        Ok(())
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"pst-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, StoreError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("id generation returned no row".into()))?;
        Ok(row.get::<String>(0)?)
    }
}
