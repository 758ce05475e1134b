//! Authenticated session identity for cross-crate passing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Lightweight authenticated user identity.
///
/// Produced by `vv-auth` at session start, consumed by `vv-db` service
/// construction. Contains only data fields — no auth logic, no provider
/// calls. Passed explicitly rather than read from ambient global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Identity {
    /// Provider user id.
    pub uid: String,
    pub email: String,
    /// Display name; falls back to the local part of the email at sign-in.
    pub name: String,
    pub role: Role,
}
