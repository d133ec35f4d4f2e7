//! Database repository for per-user preferences.
//!
//! Preferences are a single row per user, created lazily: the only
//! read operation is [`Preferences::get_or_create`], which initializes
//! the row with defaults on first access.

use crate::db::{
    errors::Result,
    models::preferences::{PreferenceDBResponse, PreferenceUpdateDBRequest},
};
use crate::types::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, FromRow, SqliteConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Preference {
    pub user_id: UserId,
    pub theme: String,
    pub last_project_id: Option<ProjectId>,
    pub window_bounds: Json<Value>,
    pub updated_at: DateTime<Utc>,
}

impl From<Preference> for PreferenceDBResponse {
    fn from(prefs: Preference) -> Self {
        Self {
            user_id: prefs.user_id,
            theme: prefs.theme,
            last_project_id: prefs.last_project_id,
            window_bounds: prefs.window_bounds.0,
            updated_at: prefs.updated_at,
        }
    }
}

pub struct Preferences<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Preferences<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Read the user's preferences row, initializing it with defaults
    /// if none exists yet. Idempotent; never creates a second row.
    #[instrument(skip(self), err)]
    pub async fn get_or_create(&mut self, owner: UserId) -> Result<PreferenceDBResponse> {
        sqlx::query(
            "INSERT INTO preferences (user_id, updated_at)
             VALUES (?1, ?2)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(owner)
        .bind(Utc::now())
        .execute(&mut *self.db)
        .await?;

        let prefs = sqlx::query_as::<_, Preference>("SELECT * FROM preferences WHERE user_id = ?1")
            .bind(owner)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(prefs.into())
    }

    /// Apply a partial update, initializing the row first if needed.
    ///
    /// `updated_at` refreshes even when the request is empty, matching
    /// the save-on-every-write behavior of the HTTP surface.
    #[instrument(skip(self, request), err)]
    pub async fn update(&mut self, owner: UserId, request: &PreferenceUpdateDBRequest) -> Result<PreferenceDBResponse> {
        self.get_or_create(owner).await?;

        let prefs = sqlx::query_as::<_, Preference>(
            "UPDATE preferences SET
                theme = COALESCE(?2, theme),
                last_project_id = CASE WHEN ?3 THEN ?4 ELSE last_project_id END,
                window_bounds = COALESCE(?5, window_bounds),
                updated_at = ?6
             WHERE user_id = ?1
             RETURNING *",
        )
        .bind(owner)
        .bind(&request.theme)
        .bind(request.last_project_id.is_some())
        .bind(request.last_project_id.flatten())
        .bind(request.window_bounds.as_ref().map(Json))
        .bind(Utc::now())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(prefs.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{handlers::Users, models::users::UserCreateDBRequest};
    use serde_json::json;
    use sqlx::SqlitePool;
    use std::time::Duration;

    async fn seed_user(pool: &SqlitePool, username: &str) -> UserId {
        let mut conn = pool.acquire().await.unwrap();
        let mut users = Users::new(&mut conn);
        users
            .create(&UserCreateDBRequest {
                username: username.to_string(),
                password_hash: "$argon2id$fake-hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[sqlx::test]
    async fn test_get_or_create_initializes_defaults_once(pool: SqlitePool) {
        let owner = seed_user(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Preferences::new(&mut conn);

        let first = repo.get_or_create(owner).await.unwrap();
        assert_eq!(first.theme, "light");
        assert_eq!(first.last_project_id, None);
        assert_eq!(first.window_bounds, json!({}));

        // Second read returns the same row, not a fresh one.
        let second = repo.get_or_create(owner).await.unwrap();
        assert_eq!(second.updated_at, first.updated_at);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM preferences WHERE user_id = ?1")
            .bind(owner)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test]
    async fn test_partial_update_touches_only_present_keys(pool: SqlitePool) {
        let owner = seed_user(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Preferences::new(&mut conn);

        repo.update(
            owner,
            &PreferenceUpdateDBRequest {
                theme: Some("dark".to_string()),
                last_project_id: Some(Some(7)),
                window_bounds: Some(json!({"width": 1200, "height": 800})),
            },
        )
        .await
        .unwrap();

        let updated = repo
            .update(
                owner,
                &PreferenceUpdateDBRequest {
                    theme: Some("solarized".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.theme, "solarized");
        assert_eq!(updated.last_project_id, Some(7));
        assert_eq!(updated.window_bounds, json!({"width": 1200, "height": 800}));
    }

    #[sqlx::test]
    async fn test_explicit_null_clears_last_project_id(pool: SqlitePool) {
        let owner = seed_user(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Preferences::new(&mut conn);

        repo.update(
            owner,
            &PreferenceUpdateDBRequest {
                last_project_id: Some(Some(3)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let cleared = repo
            .update(
                owner,
                &PreferenceUpdateDBRequest {
                    last_project_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(cleared.last_project_id, None);
    }

    #[sqlx::test]
    async fn test_empty_update_still_refreshes_updated_at(pool: SqlitePool) {
        let owner = seed_user(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Preferences::new(&mut conn);

        let initial = repo.get_or_create(owner).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = repo.update(owner, &PreferenceUpdateDBRequest::default()).await.unwrap();
        assert!(updated.updated_at > initial.updated_at);
        assert_eq!(updated.theme, initial.theme);
    }
}
