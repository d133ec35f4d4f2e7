//! Common type aliases.
//!
//! Identifiers are SQLite rowids, so they are plain `i64` values rather
//! than wrapper types.

/// User account identifier.
pub type UserId = i64;

/// Project identifier.
pub type ProjectId = i64;
