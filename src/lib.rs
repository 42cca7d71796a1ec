//! Shelfmark Library Management System
//!
//! A REST JSON API for a small lending library: account registration and
//! login, an administrator-managed book catalog, and borrow/return tracking
//! that keeps book availability consistent with the loan records.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Accounts
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        // Catalog (administrator)
        .route("/admin/books", get(api::books::list_books))
        .route("/admin/books", post(api::books::create_book))
        .route("/admin/books/:id", get(api::books::get_book))
        .route("/admin/books/:id", put(api::books::update_book))
        .route("/admin/books/:id", delete(api::books::delete_book))
        .route("/admin/borrowed-books", get(api::loans::all_borrowed_books))
        // Catalog (reader)
        .route("/user/books", get(api::books::browse_books))
        // Loans
        .route("/user/borrow/:book_id", post(api::loans::borrow_book))
        .route("/user/return/:book_id", post(api::loans::return_book))
        .route(
            "/user/borrowed-books/:username",
            get(api::loans::user_borrowed_books),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
