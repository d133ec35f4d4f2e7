//! Database request/response models.
//!
//! These structs mirror table rows and the shapes repositories accept.
//! API-facing serialization lives in [`crate::api::models`]; the
//! conversions between the two layers are defined there.

pub mod preferences;
pub mod projects;
pub mod users;
