//! API request/response models for preferences.

use crate::db::models::preferences::{PreferenceDBResponse, PreferenceUpdateDBRequest};
use crate::types::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Distinguish an explicitly supplied `null` from an absent key.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Partial preferences update. Unknown keys in the payload are ignored
/// by the deserializer; absent keys keep their stored values;
/// `last_project_id: null` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PreferencesUpdate {
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub last_project_id: Option<Option<ProjectId>>,
    #[schema(value_type = Object)]
    pub window_bounds: Option<Value>,
}

impl From<PreferencesUpdate> for PreferenceUpdateDBRequest {
    fn from(update: PreferencesUpdate) -> Self {
        Self {
            theme: update.theme,
            last_project_id: update.last_project_id,
            window_bounds: update.window_bounds,
        }
    }
}

/// Flat preferences state as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreferencesResponse {
    pub theme: String,
    pub last_project_id: Option<ProjectId>,
    #[schema(value_type = Object)]
    pub window_bounds: Value,
    pub updated_at: DateTime<Utc>,
}

impl From<PreferenceDBResponse> for PreferencesResponse {
    fn from(db: PreferenceDBResponse) -> Self {
        Self {
            theme: db.theme,
            last_project_id: db.last_project_id,
            window_bounds: db.window_bounds,
            updated_at: db.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_vs_null_last_project_id() {
        let absent: PreferencesUpdate = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(absent.last_project_id, None);

        let null: PreferencesUpdate = serde_json::from_str(r#"{"last_project_id":null}"#).unwrap();
        assert_eq!(null.last_project_id, Some(None));

        let set: PreferencesUpdate = serde_json::from_str(r#"{"last_project_id":12}"#).unwrap();
        assert_eq!(set.last_project_id, Some(Some(12)));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let update: PreferencesUpdate = serde_json::from_str(r#"{"theme":"dark","bogus":"x"}"#).unwrap();
        assert_eq!(update.theme.as_deref(), Some("dark"));
        assert_eq!(update.window_bounds, None);
    }
}
