//! Store error types for vv-db.

use thiserror::Error;
use vv_core::validate::FieldErrors;

/// Errors from entity-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store backend is not configured (missing URL/token).
    #[error("Store not configured: {0}")]
    NotConfigured(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Entity lookup returned no result.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    /// Input failed field-level validation. Nothing was persisted.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The caller's session does not permit the attempted action.
    #[error("Access denied: {action} requires role {required}")]
    AccessDenied {
        action: &'static str,
        required: &'static str,
    },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
