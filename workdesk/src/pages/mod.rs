//! Server-rendered page surface.
//!
//! Pages share the repositories with the JSON API but speak HTML forms
//! and redirects instead of JSON. Templates are compiled into the
//! binary and rendered with minijinja.
//!
//! Unauthenticated page requests are redirected to the login form (the
//! API surface returns 401 instead); the [`PageUser`] extractor
//! encodes that rule.

pub mod auth;
pub mod projects;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{Html, Redirect},
};
use minijinja::Environment;
use std::sync::Arc;

use crate::{api::models::users::CurrentUser, errors::Error, AppState};

/// Build the shared template environment. Templates are embedded at
/// compile time, so failures here are programming errors.
pub fn templates() -> Arc<Environment<'static>> {
    let mut env = Environment::new();
    for (name, source) in [
        ("base.html", include_str!("../../templates/base.html")),
        ("login.html", include_str!("../../templates/login.html")),
        ("register.html", include_str!("../../templates/register.html")),
        ("projects_list.html", include_str!("../../templates/projects_list.html")),
        ("project_detail.html", include_str!("../../templates/project_detail.html")),
    ] {
        env.add_template(name, source).expect("embedded template must parse");
    }
    Arc::new(env)
}

/// Render a named template with the given context.
pub(crate) fn render(state: &AppState, name: &str, ctx: minijinja::Value) -> Result<Html<String>, Error> {
    let template = state.templates.get_template(name).map_err(|e| Error::Internal {
        operation: format!("load template {name}: {e}"),
    })?;

    let html = template.render(ctx).map_err(|e| Error::Internal {
        operation: format!("render template {name}: {e}"),
    })?;

    Ok(Html(html))
}

/// Authenticated user for page handlers; rejection is a redirect to the
/// login form rather than a 401.
pub struct PageUser(pub CurrentUser);

impl FromRequestParts<AppState> for PageUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        CurrentUser::from_request_parts(parts, state)
            .await
            .map(PageUser)
            .map_err(|_| Redirect::to("/auth/login"))
    }
}

/// Landing page: everything starts at the project list.
pub async fn home() -> Redirect {
    Redirect::to("/projects/")
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, signup};
    use axum::http::StatusCode;
    use sqlx::SqlitePool;

    #[test]
    fn test_all_templates_parse() {
        let env = super::templates();
        for name in [
            "base.html",
            "login.html",
            "register.html",
            "projects_list.html",
            "project_detail.html",
        ] {
            assert!(env.get_template(name).is_ok(), "missing template {name}");
        }
    }

    #[sqlx::test]
    async fn test_home_redirects_to_project_list(pool: SqlitePool) {
        let server = create_test_app(pool).await;

        let response = server.get("/").await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), "/projects/");
    }

    #[sqlx::test]
    async fn test_unauthenticated_page_redirects_to_login(pool: SqlitePool) {
        let server = create_test_app(pool).await;

        let response = server.get("/projects/").await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), "/auth/login");
    }

    #[sqlx::test]
    async fn test_static_assets_are_served(pool: SqlitePool) {
        let server = create_test_app(pool).await;

        let response = server.get("/static/app.css").await;
        response.assert_status_ok();
        assert!(response.headers().get("content-type").unwrap().to_str().unwrap().contains("css"));

        server.get("/static/nope.css").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[sqlx::test]
    async fn test_legacy_account_paths_redirect(pool: SqlitePool) {
        let server = create_test_app(pool).await;
        signup(&server, "alice").await;

        for (from, to) in [
            ("/accounts/login/", "/auth/login"),
            ("/accounts/register/", "/auth/register"),
            ("/accounts/logout/", "/auth/login"),
        ] {
            let response = server.get(from).await;
            response.assert_status(StatusCode::SEE_OTHER);
            assert_eq!(response.headers().get("location").unwrap(), to, "redirect for {from}");
        }
    }
}
