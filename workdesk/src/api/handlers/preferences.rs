//! JSON API handlers for per-user preferences.

use axum::{body::Bytes, extract::State, Json};

use crate::{
    api::{
        handlers::lenient_json,
        models::{
            preferences::{PreferencesResponse, PreferencesUpdate},
            users::CurrentUser,
            Ack,
        },
    },
    db::handlers::Preferences,
    errors::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/preferences/",
    tag = "preferences",
    summary = "Get preferences",
    responses(
        (status = 200, description = "Current preferences (created with defaults on first access)", body = PreferencesResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_cookie" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_preferences(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<PreferencesResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Preferences::new(&mut conn);

    let prefs = repo.get_or_create(current_user.id).await?;
    Ok(Json(PreferencesResponse::from(prefs)))
}

#[utoipa::path(
    post,
    path = "/api/preferences/",
    tag = "preferences",
    summary = "Update preferences",
    request_body = PreferencesUpdate,
    responses(
        (status = 200, description = "Preferences updated", body = Ack),
        (status = 401, description = "Unauthorized"),
    ),
    security(("session_cookie" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_preferences(State(state): State<AppState>, current_user: CurrentUser, body: Bytes) -> Result<Json<Ack>> {
    let update: PreferencesUpdate = lenient_json(&body);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Preferences::new(&mut conn);

    repo.update(current_user.id, &update.into()).await?;
    Ok(Json(Ack::ok()))
}
