//! OpenAPI documentation for the JSON API surface.
//!
//! The page surface (forms and redirects) is deliberately not part of
//! the document; it is not a machine API.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::models::{
    preferences::{PreferencesResponse, PreferencesUpdate},
    projects::{ProjectCreate, ProjectCreated, ProjectResponse, ProjectUpdate},
    Ack,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::projects::list_projects,
        crate::api::handlers::projects::create_project,
        crate::api::handlers::projects::get_project,
        crate::api::handlers::projects::update_project,
        crate::api::handlers::projects::delete_project,
        crate::api::handlers::preferences::get_preferences,
        crate::api::handlers::preferences::update_preferences,
    ),
    components(schemas(
        Ack,
        ProjectCreate,
        ProjectCreated,
        ProjectResponse,
        ProjectUpdate,
        PreferencesResponse,
        PreferencesUpdate,
    )),
    modifiers(&SessionCookieSecurity),
    tags(
        (name = "projects", description = "Ownership-scoped project CRUD"),
        (name = "preferences", description = "Per-user UI state"),
        (name = "health", description = "Liveness check for the desktop launcher"),
    ),
    info(
        title = "workdesk API",
        description = "Session-cookie authenticated JSON API of the workdesk app"
    )
)]
pub struct ApiDoc;

/// Registers the session cookie as the API's security scheme.
struct SessionCookieSecurity;

impl Modify for SessionCookieSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("workdesk_session"))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_contains_all_api_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in [
            "/api/health/",
            "/api/projects/",
            "/api/projects/{id}/",
            "/api/preferences/",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing path {expected} in {paths:?}");
        }
    }
}
