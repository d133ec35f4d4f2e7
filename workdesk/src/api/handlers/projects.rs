//! JSON API handlers for projects.
//!
//! Every operation is scoped to the session user; an id owned by
//! another user produces the same 404 as a nonexistent id.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::{
        handlers::lenient_json,
        models::{
            projects::{ProjectCreate, ProjectCreated, ProjectResponse, ProjectUpdate},
            users::CurrentUser,
            Ack,
        },
    },
    db::handlers::{OwnedRepository, Projects},
    errors::{Error, Result},
    types::ProjectId,
    AppState,
};

fn project_not_found(id: ProjectId) -> Error {
    Error::NotFound {
        resource: "Project".to_string(),
        id: id.to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/api/projects/",
    tag = "projects",
    summary = "List projects",
    responses(
        (status = 200, description = "Caller's projects, most recently touched first", body = Vec<ProjectResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_cookie" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_projects(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<ProjectResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Projects::new(&mut conn);

    let projects = repo.list(current_user.id).await?;
    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/projects/",
    tag = "projects",
    summary = "Create project",
    request_body = ProjectCreate,
    responses(
        (status = 201, description = "Project created", body = ProjectCreated),
        (status = 400, description = "Missing or empty title"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_cookie" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    body: Bytes,
) -> Result<(StatusCode, Json<ProjectCreated>)> {
    let create: ProjectCreate = lenient_json(&body);
    let request = create.validate()?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Projects::new(&mut conn);

    let project = repo.create(current_user.id, &request).await?;
    Ok((StatusCode::CREATED, Json(ProjectCreated { id: project.id })))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/",
    tag = "projects",
    summary = "Get project",
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found"),
    ),
    params(("id" = i64, Path, description = "Project ID")),
    security(("session_cookie" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ProjectId>,
) -> Result<Json<ProjectResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Projects::new(&mut conn);

    match repo.get_by_id(current_user.id, id).await? {
        Some(project) => Ok(Json(ProjectResponse::from(project))),
        None => Err(project_not_found(id)),
    }
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}/",
    tag = "projects",
    summary = "Update project",
    request_body = ProjectUpdate,
    responses(
        (status = 200, description = "Project updated", body = Ack),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found"),
    ),
    params(("id" = i64, Path, description = "Project ID")),
    security(("session_cookie" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ProjectId>,
    body: Bytes,
) -> Result<Json<Ack>> {
    let update: ProjectUpdate = lenient_json(&body);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Projects::new(&mut conn);

    match repo.update(current_user.id, id, &update.into()).await? {
        Some(_) => Ok(Json(Ack::ok())),
        None => Err(project_not_found(id)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}/",
    tag = "projects",
    summary = "Delete project",
    responses(
        (status = 200, description = "Project deleted", body = Ack),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found"),
    ),
    params(("id" = i64, Path, description = "Project ID")),
    security(("session_cookie" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_project(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ProjectId>,
) -> Result<Json<Ack>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Projects::new(&mut conn);

    if repo.delete(current_user.id, id).await? {
        Ok(Json(Ack::ok()))
    } else {
        Err(project_not_found(id))
    }
}
