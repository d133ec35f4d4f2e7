//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection, provides strongly-typed
//! CRUD operations, and returns domain models from
//! [`crate::db::models`]. Per-user resources implement
//! [`OwnedRepository`], which threads the caller's identity through
//! every query.
//!
//! # Available Repositories
//!
//! - [`Users`]: account storage backing the credential layer
//! - [`Projects`]: ownership-scoped project CRUD
//! - [`Preferences`]: lazily-created single row of UI state per user

pub mod preferences;
pub mod projects;
pub mod repository;
pub mod users;

pub use preferences::Preferences;
pub use projects::Projects;
pub use repository::OwnedRepository;
pub use users::Users;
