use crate::{
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
    AppState,
};
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use tracing::{instrument, trace};

/// Extract user from the session cookie if present and valid
/// Returns:
/// - None: No session cookie present, or the token is invalid/expired
/// - Some(user): Valid session found and verified
///
/// Invalid or expired tokens are treated the same as absent ones; they
/// are expected during normal operation and carry no extra signal.
#[instrument(skip(parts, config))]
fn try_session_auth(parts: &Parts, config: &crate::config::Config) -> Option<CurrentUser> {
    let cookie_header = parts.headers.get(axum::http::header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;
    let cookie_name = &config.auth.session.cookie_name;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=') {
            if name == cookie_name {
                match session::verify_session_token(value, config) {
                    Ok(user) => return Some(user),
                    Err(_) => continue,
                }
            }
        }
    }
    None
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_session_auth(parts, &state.config) {
            Some(user) => {
                trace!("Found session authenticated user: {}", user.id);
                Ok(user)
            }
            None => {
                trace!("No valid session credentials found in request");
                Err(Error::Unauthenticated { message: None })
            }
        }
    }
}

/// Optional variant for pages that behave differently for signed-in
/// users (e.g. login/register redirect straight to the project list).
impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> std::result::Result<Option<Self>, Self::Rejection> {
        Ok(try_session_auth(parts, &state.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::create_session_token;
    use crate::test_utils::create_test_config;
    use axum::extract::FromRequestParts as _;
    use sqlx::SqlitePool;

    fn parts_with_cookie(cookie: Option<&str>) -> Parts {
        let mut builder = axum::http::Request::builder().uri("http://localhost/test");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let (parts, _body) = builder.body(()).unwrap().into_parts();
        parts
    }

    async fn test_state(pool: SqlitePool) -> AppState {
        AppState::builder()
            .db(pool)
            .config(create_test_config())
            .templates(crate::pages::templates())
            .build()
    }

    #[sqlx::test]
    async fn test_valid_session_cookie(pool: SqlitePool) {
        let state = test_state(pool).await;
        let user = CurrentUser {
            id: 7,
            username: "alice".to_string(),
        };
        let token = create_session_token(&user, false, &state.config).unwrap();

        let cookie = format!("{}={token}", state.config.auth.session.cookie_name);
        let mut parts = parts_with_cookie(Some(&cookie));

        let extracted = <CurrentUser as FromRequestParts<AppState>>::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(extracted.id, 7);
        assert_eq!(extracted.username, "alice");
    }

    #[sqlx::test]
    async fn test_missing_cookie_is_unauthenticated(pool: SqlitePool) {
        let state = test_state(pool).await;
        let mut parts = parts_with_cookie(None);

        let error = <CurrentUser as FromRequestParts<AppState>>::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_garbage_token_is_unauthenticated(pool: SqlitePool) {
        let state = test_state(pool).await;
        let cookie = format!("{}=garbage.token.value", state.config.auth.session.cookie_name);
        let mut parts = parts_with_cookie(Some(&cookie));

        let error = <CurrentUser as FromRequestParts<AppState>>::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_unrelated_cookies_are_ignored(pool: SqlitePool) {
        let state = test_state(pool).await;
        let user = CurrentUser {
            id: 9,
            username: "bob".to_string(),
        };
        let token = create_session_token(&user, true, &state.config).unwrap();

        let cookie = format!("other=1; {}={token}; tracking=xyz", state.config.auth.session.cookie_name);
        let mut parts = parts_with_cookie(Some(&cookie));

        let extracted = <CurrentUser as FromRequestParts<AppState>>::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(extracted.username, "bob");
    }
}
