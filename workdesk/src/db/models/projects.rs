//! Database models for projects.

use crate::types::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Database request for creating a new project
#[derive(Debug, Clone)]
pub struct ProjectCreateDBRequest {
    pub title: String,
    pub description: String,
    pub data: Value,
}

/// Database request for a partial project update.
///
/// `None` fields keep their stored value; `updated_at` refreshes on
/// every update regardless.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdateDBRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub data: Option<Value>,
}

/// Database response for a project
#[derive(Debug, Clone)]
pub struct ProjectDBResponse {
    pub id: ProjectId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
