//! Test utilities for integration testing (available with `test-utils` feature).

use axum_test::{TestServer, TestServerConfig};
use sqlx::SqlitePool;

use crate::{config::Config, AppState};

/// Password used by [`signup`] and [`login_as`].
pub const TEST_PASSWORD: &str = "correct-horse";

pub fn create_test_config() -> Config {
    Config {
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Default::default()
    }
}

/// Build a test server with cookie persistence over an already
/// migrated pool (as provided by `#[sqlx::test]`).
pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    create_test_app_with_config(pool, create_test_config()).await
}

pub async fn create_test_app_with_config(pool: SqlitePool, config: Config) -> TestServer {
    let state = AppState::builder()
        .db(pool)
        .config(config)
        .templates(crate::pages::templates())
        .build();

    let router = crate::build_router(state).expect("Failed to build router");

    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    TestServer::new_with_config(router, config).expect("Failed to create test server")
}

/// Register a fresh account through the page surface; the server keeps
/// the session cookie for subsequent requests.
pub async fn signup(server: &TestServer, username: &str) {
    let response = server
        .post("/auth/register")
        .form(&[
            ("username", username),
            ("password", TEST_PASSWORD),
            ("password_confirm", TEST_PASSWORD),
        ])
        .await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
}

/// Log in to an existing account through the page surface.
pub async fn login_as(server: &TestServer, username: &str) {
    let response = server
        .post("/auth/login")
        .form(&[("username", username), ("password", TEST_PASSWORD)])
        .await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
}
