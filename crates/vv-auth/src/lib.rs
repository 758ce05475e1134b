//! # vv-auth
//!
//! Session handling for Voices and Viewpoints.
//!
//! Provides the [`IdentityProvider`] seam, role resolution against the admin
//! allowlist (`RoleResolver`), and an in-process provider for tests. Storage
//! code takes the resulting [`vv_core::identity::Identity`] as an explicit
//! session argument rather than reading ambient global state.

pub mod error;
pub mod provider;
pub mod resolver;

pub use error::AuthError;
pub use provider::{IdentityProvider, InProcessProvider};
pub use resolver::RoleResolver;
