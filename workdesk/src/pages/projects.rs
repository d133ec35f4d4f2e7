//! Project list and detail pages.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use serde::Deserialize;

use crate::{
    api::models::projects::ProjectResponse,
    db::handlers::{OwnedRepository, Projects},
    db::models::projects::{ProjectCreateDBRequest, ProjectUpdateDBRequest},
    errors::{Error, Result},
    pages::{render, PageUser},
    types::ProjectId,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ProjectCreateForm {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Detail form doubles as the delete action: a `delete` field wins over
/// the edit fields.
#[derive(Debug, Deserialize)]
pub struct ProjectDetailForm {
    pub delete: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

fn project_not_found(id: ProjectId) -> Error {
    Error::NotFound {
        resource: "Project".to_string(),
        id: id.to_string(),
    }
}

async fn render_list(state: &AppState, user: &PageUser, error: Option<&str>, title: &str) -> Result<Response> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Projects::new(&mut conn);

    let projects: Vec<ProjectResponse> = repo.list(user.0.id).await?.into_iter().map(Into::into).collect();

    Ok(render(
        state,
        "projects_list.html",
        context! {
            user => user.0.username,
            projects => projects,
            error => error,
            title => title,
        },
    )?
    .into_response())
}

#[tracing::instrument(skip_all)]
pub async fn list_page(State(state): State<AppState>, user: PageUser) -> Result<Response> {
    render_list(&state, &user, None, "").await
}

#[tracing::instrument(skip_all)]
pub async fn list_submit(State(state): State<AppState>, user: PageUser, Form(form): Form<ProjectCreateForm>) -> Result<Response> {
    let title = form.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return render_list(&state, &user, Some("A title is required to create a project"), "").await;
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Projects::new(&mut conn);

    repo.create(
        user.0.id,
        &ProjectCreateDBRequest {
            title: title.to_string(),
            description: form.description.unwrap_or_default(),
            data: serde_json::Value::Object(Default::default()),
        },
    )
    .await?;

    Ok(Redirect::to("/projects/").into_response())
}

#[tracing::instrument(skip_all)]
pub async fn detail_page(State(state): State<AppState>, user: PageUser, Path(id): Path<ProjectId>) -> Result<Response> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Projects::new(&mut conn);

    let Some(project) = repo.get_by_id(user.0.id, id).await? else {
        return Err(project_not_found(id));
    };

    Ok(render(
        &state,
        "project_detail.html",
        context! {
            user => user.0.username,
            project => ProjectResponse::from(project),
        },
    )?
    .into_response())
}

#[tracing::instrument(skip_all)]
pub async fn detail_submit(
    State(state): State<AppState>,
    user: PageUser,
    Path(id): Path<ProjectId>,
    Form(form): Form<ProjectDetailForm>,
) -> Result<Response> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Projects::new(&mut conn);

    if form.delete.is_some() {
        if !repo.delete(user.0.id, id).await? {
            return Err(project_not_found(id));
        }
        return Ok(Redirect::to("/projects/").into_response());
    }

    let update = ProjectUpdateDBRequest {
        title: form.title,
        description: form.description,
        data: None,
    };

    let Some(project) = repo.update(user.0.id, id, &update).await? else {
        return Err(project_not_found(id));
    };

    Ok(render(
        &state,
        "project_detail.html",
        context! {
            user => user.0.username,
            project => ProjectResponse::from(project),
        },
    )?
    .into_response())
}
