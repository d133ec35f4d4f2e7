//! Database models for per-user preferences.

use crate::types::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Database request for a partial preferences update.
///
/// `last_project_id` distinguishes "leave unchanged" (`None`) from
/// "clear the value" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct PreferenceUpdateDBRequest {
    pub theme: Option<String>,
    pub last_project_id: Option<Option<ProjectId>>,
    pub window_bounds: Option<Value>,
}

/// Database response for a preferences row
#[derive(Debug, Clone)]
pub struct PreferenceDBResponse {
    pub user_id: UserId,
    pub theme: String,
    pub last_project_id: Option<ProjectId>,
    pub window_bounds: Value,
    pub updated_at: DateTime<Utc>,
}
