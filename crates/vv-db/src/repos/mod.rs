//! Repository modules implementing CRUD and lifecycle operations for all
//! platform entities.
//!
//! Each module adds methods to `VvService` via `impl VvService` blocks.

pub mod application;
pub mod author;
pub mod comment;
pub mod notification;
pub mod post;
pub mod subscriber;
pub mod user;
