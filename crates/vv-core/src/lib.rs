//! # vv-core
//!
//! Core types for the Voices and Viewpoints content platform.
//!
//! This crate provides the foundational types shared across all platform crates:
//! - Entity structs for all domain objects (posts, authors, comments, applications, ...)
//! - Status enums with state machine transitions
//! - The role/action access-control model
//! - ID prefix constants
//! - Field-level validation primitives

pub mod access;
pub mod entities;
pub mod enums;
pub mod identity;
pub mod ids;
pub mod validate;
