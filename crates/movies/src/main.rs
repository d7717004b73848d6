//! Reelbox movies - movie search and review site.
//!
//! This binary serves the site on port 3000 by default.
//!
//! # Architecture
//!
//! - Axum web framework, Askama templates for server-side rendering
//! - OMDb API for search and movie details
//! - `PostgreSQL` for accounts, pictures, reviews, and sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use reelbox_movies::{build_router, config::MoviesConfig, db, state::AppState};
use tower_sessions_sqlx_store::PostgresStore;

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = MoviesConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = reelbox_web::telemetry::init_sentry(&config.sentry, sentry::release_name!());
    reelbox_web::telemetry::init_tracing("reelbox_movies=info,tower_http=debug");

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p reelbox-cli -- migrate

    let store = PostgresStore::new(pool.clone());
    let addr = config.socket_addr();
    let state = AppState::new(config, pool);

    let app = build_router(state, store)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    tracing::info!("movies listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Peer addresses feed the login rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(reelbox_web::shutdown_signal())
    .await
    .expect("Server error");
}
