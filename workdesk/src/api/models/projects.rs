//! API request/response models for projects.

use crate::db::models::projects::{ProjectCreateDBRequest, ProjectDBResponse, ProjectUpdateDBRequest};
use crate::errors::Error;
use crate::types::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Project creation payload.
///
/// All fields are optional at the deserialization layer so that a
/// missing title surfaces as a validation error rather than a parse
/// error; `validate` enforces the mandatory-title rule.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProjectCreate {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub data: Option<Value>,
}

impl ProjectCreate {
    /// Apply the mandatory-title rule and defaults for the rest.
    pub fn validate(self) -> Result<ProjectCreateDBRequest, Error> {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(Error::BadRequest {
                message: "title required".to_string(),
            });
        }

        Ok(ProjectCreateDBRequest {
            title: title.to_string(),
            description: self.description.unwrap_or_default(),
            data: self.data.unwrap_or_else(|| Value::Object(Default::default())),
        })
    }
}

/// Partial project update; absent keys keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub data: Option<Value>,
}

impl From<ProjectUpdate> for ProjectUpdateDBRequest {
    fn from(update: ProjectUpdate) -> Self {
        Self {
            title: update.title,
            description: update.description,
            data: update.data,
        }
    }
}

/// Full project record as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectDBResponse> for ProjectResponse {
    fn from(db: ProjectDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            data: db.data,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Body returned from a successful create.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectCreated {
    pub id: ProjectId,
}
