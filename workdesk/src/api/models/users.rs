//! API models for the authenticated user.

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The identity established by a verified session.
///
/// This is the caller-identity parameter threaded through every
/// repository call; handlers never look the user up from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}
