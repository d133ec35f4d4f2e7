//! # workdesk: a locally-hosted project workbench
//!
//! `workdesk` is a desktop-packaged web application: an HTTP server that
//! runs on the loopback interface, stores its state in a single-file
//! SQLite database, and is opened in a local window by a thin launcher.
//! It exposes the same two stores over two surfaces:
//!
//! - a **JSON API** (`/api/projects/`, `/api/preferences/`,
//!   `/api/health/`) consumed by the desktop shell, and
//! - a **page surface** (`/auth/*`, `/projects/*`) of server-rendered
//!   forms with the classic redirect-after-write shape.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum)
//! for the HTTP layer and SQLx/SQLite for persistence.
//!
//! A request first passes the session extractor: the
//! [`CurrentUser`](api::models::users::CurrentUser) type verifies the
//! signed session cookie minted at login. Handlers then reach the
//! database through repository interfaces
//! ([`db::handlers`]) that take the caller's identity as an explicit
//! parameter; ownership filtering happens inside the repository, so a
//! foreign row and a missing row are indistinguishable to every caller.
//!
//! The **API layer** ([`api`]) maps HTTP verbs onto those repositories
//! with lenient JSON body parsing (a malformed body is an empty
//! payload). The **page layer** ([`pages`]) renders minijinja templates
//! and speaks HTML forms over the same repositories. The **launcher**
//! ([`launcher`]) is the only consumer of the health endpoint: it polls
//! with a bounded retry loop and then opens the local URL in the OS
//! default browser.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use workdesk::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = workdesk::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     workdesk::telemetry::init_telemetry();
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod launcher;
mod openapi;
pub mod pages;
mod static_assets;
pub mod telemetry;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use anyhow::Context;
use axum::{
    http::{self, HeaderValue},
    response::Redirect,
    routing::{get, post},
    Router,
};
use bon::Builder;
pub use config::Config;
use minijinja::Environment;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{ProjectId, UserId};

/// Application state shared across all request handlers.
///
/// # Fields
///
/// - `db`: SQLite connection pool
/// - `config`: Application configuration loaded from file/environment
/// - `templates`: Compiled minijinja environment for the page surface
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    pub templates: Arc<Environment<'static>>,
}

/// Get the workdesk database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        let header_value = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("invalid CORS origin {origin}"))?;
        origins.push(header_value);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials)
        .expose_headers(vec![http::header::LOCATION]))
}

/// Build the main application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - The JSON API (projects, preferences, health)
/// - The page surface (auth forms, project pages)
/// - Embedded static assets and API docs
/// - CORS configuration and tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/health/", get(api::handlers::health::health))
        .route(
            "/projects/",
            get(api::handlers::projects::list_projects).post(api::handlers::projects::create_project),
        )
        .route(
            "/projects/{id}/",
            get(api::handlers::projects::get_project)
                .put(api::handlers::projects::update_project)
                .delete(api::handlers::projects::delete_project),
        )
        .route(
            "/preferences/",
            get(api::handlers::preferences::get_preferences)
                .post(api::handlers::preferences::update_preferences)
                .put(api::handlers::preferences::update_preferences),
        );

    let page_routes = Router::new()
        .route("/", get(pages::home))
        .route("/auth/login", get(pages::auth::login_page).post(pages::auth::login_submit))
        .route(
            "/auth/register",
            get(pages::auth::register_page).post(pages::auth::register_submit),
        )
        // State-changing action must not be triggerable by a link fetch
        .route("/auth/logout", post(pages::auth::logout))
        .route(
            "/projects/",
            get(pages::projects::list_page).post(pages::projects::list_submit),
        )
        .route(
            "/projects/{id}/",
            get(pages::projects::detail_page).post(pages::projects::detail_submit),
        )
        // Back-compat redirects for old default auth paths
        .route("/accounts/login/", get(|| async { Redirect::to("/auth/login") }))
        .route("/accounts/register/", get(|| async { Redirect::to("/auth/register") }))
        .route("/accounts/logout/", get(|| async { Redirect::to("/auth/login") }));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .route("/static/{*path}", get(static_assets::serve_asset))
        .with_state(state)
        .merge(Scalar::with_url("/docs", openapi::ApiDoc::openapi()))
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects the pool, runs
///    migrations and builds the router
/// 2. **Serve**: [`Application::serve`] binds the TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database.url)
            .with_context(|| format!("invalid database url {}", config.database.url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new().max_connections(5).connect_with(options).await?;

        migrator().run(&pool).await?;

        let state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .templates(pages::templates())
            .build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "workdesk listening on http://{}, available at {}",
            bind_addr,
            self.config.local_url()
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;

    #[sqlx::test]
    async fn test_health_is_unauthenticated(pool: SqlitePool) {
        let server = create_test_app(pool).await;

        let response = server.get("/api/health/").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body, json!({"ok": true}));
    }

    #[sqlx::test]
    async fn test_api_docs_are_served(pool: SqlitePool) {
        let server = create_test_app(pool).await;
        server.get("/docs").await.assert_status_ok();
    }
}
