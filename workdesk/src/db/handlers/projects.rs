//! Database repository for projects.
//!
//! All operations are scoped to an owning user; a row owned by another
//! user is indistinguishable from a missing row.

use crate::db::{
    errors::Result,
    handlers::repository::OwnedRepository,
    models::projects::{ProjectCreateDBRequest, ProjectDBResponse, ProjectUpdateDBRequest},
};
use crate::types::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, FromRow, SqliteConnection};
use tracing::instrument;

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Project {
    pub id: ProjectId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub data: Json<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectDBResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            user_id: project.user_id,
            title: project.title,
            description: project.description,
            data: project.data.0,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

pub struct Projects<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Projects<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> OwnedRepository for Projects<'c> {
    type CreateRequest = ProjectCreateDBRequest;
    type UpdateRequest = ProjectUpdateDBRequest;
    type Response = ProjectDBResponse;
    type Id = ProjectId;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, owner: UserId, request: &Self::CreateRequest) -> Result<Self::Response> {
        let now = Utc::now();
        let project = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (user_id, title, description, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             RETURNING *",
        )
        .bind(owner)
        .bind(&request.title)
        .bind(&request.description)
        .bind(Json(&request.data))
        .bind(now)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(project.into())
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, owner: UserId, id: Self::Id) -> Result<Option<Self::Response>> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(project.map(Into::into))
    }

    /// Most recently touched first.
    #[instrument(skip(self), err)]
    async fn list(&mut self, owner: UserId) -> Result<Vec<Self::Response>> {
        let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE user_id = ?1 ORDER BY updated_at DESC, id DESC")
            .bind(owner)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(projects.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, owner: UserId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>> {
        // Conditional field updates in a single statement; updated_at
        // refreshes even when the request carries no field changes.
        let project = sqlx::query_as::<_, Project>(
            "UPDATE projects SET
                title = COALESCE(?3, title),
                description = COALESCE(?4, description),
                data = COALESCE(?5, data),
                updated_at = ?6
             WHERE id = ?1 AND user_id = ?2
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.data.as_ref().map(Json))
        .bind(Utc::now())
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(project.map(Into::into))
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, owner: UserId, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(owner)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
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

    fn request(title: &str) -> ProjectCreateDBRequest {
        ProjectCreateDBRequest {
            title: title.to_string(),
            description: String::new(),
            data: json!({}),
        }
    }

    #[sqlx::test]
    async fn test_create_applies_defaults(pool: SqlitePool) {
        let owner = seed_user(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Projects::new(&mut conn);

        let created = repo.create(owner, &request("First")).await.unwrap();
        assert_eq!(created.user_id, owner);
        assert_eq!(created.title, "First");
        assert_eq!(created.description, "");
        assert_eq!(created.data, json!({}));
        assert_eq!(created.created_at, created.updated_at);
    }

    #[sqlx::test]
    async fn test_ownership_scoping_collapses_to_not_found(pool: SqlitePool) {
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Projects::new(&mut conn);

        let project = repo.create(alice, &request("Alice's")).await.unwrap();

        // Bob sees the same outcome as for a nonexistent id.
        assert!(repo.get_by_id(bob, project.id).await.unwrap().is_none());
        assert!(repo.get_by_id(bob, 999_999).await.unwrap().is_none());
        assert!(repo
            .update(bob, project.id, &ProjectUpdateDBRequest::default())
            .await
            .unwrap()
            .is_none());
        assert!(!repo.delete(bob, project.id).await.unwrap());

        // The row is untouched for its owner.
        let fetched = repo.get_by_id(alice, project.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Alice's");
    }

    #[sqlx::test]
    async fn test_partial_update_keeps_absent_fields(pool: SqlitePool) {
        let owner = seed_user(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Projects::new(&mut conn);

        let created = repo
            .create(
                owner,
                &ProjectCreateDBRequest {
                    title: "Title".to_string(),
                    description: "desc".to_string(),
                    data: json!({"k": 1}),
                },
            )
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = repo
            .update(
                owner,
                created.id,
                &ProjectUpdateDBRequest {
                    description: Some("changed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Title");
        assert_eq!(updated.description, "changed");
        assert_eq!(updated.data, json!({"k": 1}));
        assert!(updated.updated_at > created.updated_at);
    }

    #[sqlx::test]
    async fn test_list_orders_by_most_recently_touched(pool: SqlitePool) {
        let owner = seed_user(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Projects::new(&mut conn);

        let p1 = repo.create(owner, &request("P1")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let p2 = repo.create(owner, &request("P2")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let p3 = repo.create(owner, &request("P3")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        repo.update(
            owner,
            p1.id,
            &ProjectUpdateDBRequest {
                title: Some("P1 touched".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        let listed = repo.list(owner).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p1.id, p3.id, p2.id]);
    }

    #[sqlx::test]
    async fn test_delete_is_permanent(pool: SqlitePool) {
        let owner = seed_user(&pool, "alice").await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Projects::new(&mut conn);

        let created = repo.create(owner, &request("Doomed")).await.unwrap();
        assert!(repo.delete(owner, created.id).await.unwrap());
        assert!(!repo.delete(owner, created.id).await.unwrap());
        assert!(repo.get_by_id(owner, created.id).await.unwrap().is_none());
    }
}
