//! Reelbox movie site library.
//!
//! Movie search over OMDb, with user accounts, profile pictures, and reviews
//! stored in `PostgreSQL`. The binary in `main.rs` wires telemetry, the
//! database pool, and the `PostgreSQL` session store; everything else lives
//! here so the router can be exercised from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod omdb;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, middleware as axum_middleware, routing::get};
use reelbox_web::middleware::{SecurityHeaders, request_id_middleware, security_headers_middleware};
use tower_http::services::ServeDir;
use tower_sessions::SessionStore;

use crate::state::AppState;

/// Hosts OMDb poster URLs point at.
pub const POSTER_SOURCES: &[&str] = &["https://m.media-amazon.com", "https://ia.media-imdb.com"];

/// Build the full application router.
///
/// Layers, innermost first: session, request id, security headers, HTTP
/// trace span. Sentry layers are added by the binary.
pub fn build_router<Store>(state: AppState, store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    let mut img_sources = POSTER_SOURCES.to_vec();
    // Profile pictures are inlined
    img_sources.push("data:");
    let is_secure = state.config().is_secure();
    let trust_proxy = state.config().trust_proxy;
    let security = SecurityHeaders::new(&img_sources, is_secure);
    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

    Router::new()
        .route("/health", get(reelbox_web::health))
        .route("/health/ready", get(routes::readiness))
        .merge(routes::routes(trust_proxy))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(routes::home::not_found)
        .layer(middleware::create_session_layer(store, is_secure))
        .with_state(state)
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(axum_middleware::from_fn_with_state(
            security,
            security_headers_middleware,
        ))
        .layer(reelbox_web::trace::http_trace_layer())
}
