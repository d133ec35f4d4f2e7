//! Session-based authentication.
//!
//! Credentials are username/password pairs hashed with Argon2id
//! ([`password`]); a successful login mints a signed session token
//! ([`session`]) carried in an HttpOnly cookie. The
//! [`CurrentUser`](crate::api::models::users::CurrentUser) extractor in
//! [`current_user`] verifies the cookie on every authenticated request.

pub mod current_user;
pub mod password;
pub mod session;
