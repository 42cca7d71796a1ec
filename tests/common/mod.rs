//! Shared test harness: spawns the server on an ephemeral port against a
//! fresh in-memory database, so every test runs hermetically.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use shelfmark_server::{
    config::AppConfig, create_router, repository::Repository, services::Services, AppState,
};

/// Secret the spawned server signs tokens with; tests that forge tokens
/// must use the same value.
pub const TEST_JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub address: String,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Spawn the application against a fresh in-memory database
pub async fn spawn_app() -> TestApp {
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid database URL")
        .foreign_keys(true);

    // A single connection keeps the in-memory database alive for the whole
    // test and serializes writers the way a file-backed database would.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(connect_options)
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let mut config = AppConfig::default();
    config.auth.jwt_secret = TEST_JWT_SECRET.to_string();

    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server crashed");
    });

    TestApp {
        address,
        client: Client::new(),
    }
}

/// Register an account and log in, returning its bearer token
pub async fn register_and_login(app: &TestApp, username: &str, password: &str, role: &str) -> String {
    let response = app
        .client
        .post(app.url("/register"))
        .json(&json!({ "username": username, "password": password, "role": role }))
        .send()
        .await
        .expect("Failed to send register request");
    assert!(
        response.status().is_success(),
        "register for {} failed: {}",
        username,
        response.status()
    );

    login(app, username, password).await
}

/// Log in, returning the bearer token
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let response = app
        .client
        .post(app.url("/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(
        response.status().is_success(),
        "login for {} failed: {}",
        username,
        response.status()
    );

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["access_token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

/// Create a book as the given administrator, returning its ID
pub async fn create_book(
    app: &TestApp,
    admin_token: &str,
    title: &str,
    author: &str,
    genre: &str,
) -> i64 {
    let response = app
        .client
        .post(app.url("/admin/books"))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "title": title, "author": author, "genre": genre }))
        .send()
        .await
        .expect("Failed to send create book request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_i64().expect("No book ID")
}
