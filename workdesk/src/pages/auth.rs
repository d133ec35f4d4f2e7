//! Login, registration and logout forms.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use serde::Deserialize;

use crate::{
    api::models::users::CurrentUser,
    auth::{password, session},
    config::Config,
    db::handlers::Users,
    db::models::users::UserCreateDBRequest,
    errors::{Error, Result},
    pages::{render, PageUser},
    AppState,
};

/// Shown for any credential mismatch; never reveals whether the
/// username exists.
const LOGIN_ERROR: &str = "Invalid username or password";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Checkbox: present ("on") when ticked, absent otherwise.
    pub remember_me: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

/// Build the session cookie. Without "remember me" the cookie carries
/// no Max-Age, so it expires when the client session ends.
fn session_cookie(token: &str, remember: bool, config: &Config) -> String {
    let session = &config.auth.session;
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite={}",
        session.cookie_name, token, session.cookie_same_site
    );
    if session.cookie_secure {
        cookie.push_str("; Secure");
    }
    if remember {
        cookie.push_str(&format!("; Max-Age={}", session.remember_timeout.as_secs()));
    }
    cookie
}

/// Expired cookie used to clear the session on logout.
fn clear_session_cookie(config: &Config) -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", config.auth.session.cookie_name)
}

/// Redirect that also establishes (or clears) the session cookie.
fn redirect_with_cookie(location: &str, cookie: &str) -> Result<Response> {
    let mut response = Redirect::to(location).into_response();
    let value = HeaderValue::from_str(cookie).map_err(|e| Error::Internal {
        operation: format!("encode session cookie: {e}"),
    })?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(response)
}

/// Log the user in and send them to the project list.
async fn establish_session(user: &CurrentUser, remember: bool, config: &Config) -> Result<Response> {
    let token = session::create_session_token(user, remember, config)?;
    redirect_with_cookie("/projects/", &session_cookie(&token, remember, config))
}

#[tracing::instrument(skip_all)]
pub async fn login_page(State(state): State<AppState>, user: Option<CurrentUser>) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/projects/").into_response());
    }
    Ok(render(&state, "login.html", context! {})?.into_response())
}

#[tracing::instrument(skip_all)]
pub async fn login_submit(State(state): State<AppState>, user: Option<CurrentUser>, Form(form): Form<LoginForm>) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/projects/").into_response());
    }

    let retry = |state: &AppState, username: &str| -> Result<Response> {
        Ok(render(state, "login.html", context! { error => LOGIN_ERROR, username => username })?.into_response())
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut conn);

    let Some(account) = users.get_by_username(form.username.trim()).await? else {
        return retry(&state, &form.username);
    };

    // Verify password on a blocking thread to avoid blocking async runtime
    let password = form.password.clone();
    let hash = account.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !is_valid {
        return retry(&state, &form.username);
    }

    users.record_login(account.id).await?;

    let current_user = CurrentUser {
        id: account.id,
        username: account.username,
    };
    let remember = form.remember_me.is_some();
    establish_session(&current_user, remember, &state.config).await
}

#[tracing::instrument(skip_all)]
pub async fn register_page(State(state): State<AppState>, user: Option<CurrentUser>) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/projects/").into_response());
    }
    Ok(render(&state, "register.html", context! {})?.into_response())
}

#[tracing::instrument(skip_all)]
pub async fn register_submit(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/projects/").into_response());
    }

    let retry = |state: &AppState, error: &str, username: &str| -> Result<Response> {
        Ok(render(state, "register.html", context! { error => error, username => username })?.into_response())
    };

    if !state.config.auth.allow_registration {
        return retry(&state, "Registration is disabled", &form.username);
    }

    let username = form.username.trim().to_string();
    if username.is_empty() {
        return retry(&state, "Username is required", "");
    }

    let password_config = &state.config.auth.password;
    if form.password.len() < password_config.min_length {
        let error = format!("Password must be at least {} characters", password_config.min_length);
        return retry(&state, &error, &username);
    }
    if form.password.len() > password_config.max_length {
        let error = format!("Password must be no more than {} characters", password_config.max_length);
        return retry(&state, &error, &username);
    }
    if form.password != form.password_confirm {
        return retry(&state, "Passwords do not match", &username);
    }

    // Hash the password on a blocking thread to avoid blocking async runtime
    let password = form.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })??;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut conn);

    let created = match users
        .create(&UserCreateDBRequest {
            username: username.clone(),
            password_hash,
        })
        .await
    {
        Ok(created) => created,
        Err(err) if err.is_unique_violation_on("users.username") => {
            return retry(&state, "This username is already taken", &username);
        }
        Err(err) => return Err(err.into()),
    };
    users.record_login(created.id).await?;

    let current_user = CurrentUser {
        id: created.id,
        username: created.username,
    };
    establish_session(&current_user, false, &state.config).await
}

#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, _user: PageUser) -> Result<Response> {
    redirect_with_cookie("/auth/login", &clear_session_cookie(&state.config))
}
