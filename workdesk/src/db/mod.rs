//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx over a
//! single-file SQLite database. It follows the repository pattern to
//! provide clean abstractions over database operations.
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Ownership scoping
//!
//! Per-user resources are only reachable through repository methods
//! that take the caller's identity as an explicit parameter; the
//! repository applies `owner == caller` filtering in every query, so a
//! row owned by another user is indistinguishable from a missing row.
//! See [`handlers::repository::OwnedRepository`].
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the
//! `migrations/` directory. The [`crate::migrator`] function provides
//! access to the migrator.

pub mod errors;
pub mod handlers;
pub mod models;
