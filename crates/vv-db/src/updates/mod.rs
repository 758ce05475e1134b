//! Partial-update builders for entities with patchable fields.
//!
//! `Option<T>` means "leave unchanged when `None`"; nested `Option<Option<T>>`
//! distinguishes "unchanged" from "set to NULL".

pub mod author;
pub mod post;
