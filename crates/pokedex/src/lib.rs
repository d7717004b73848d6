//! Reelbox Pokédex library.
//!
//! A server-rendered Pokémon browser over the public `PokéAPI`. The binary
//! in `main.rs` adds telemetry and binds the listener; everything else lives
//! here so the router can be exercised from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod pokeapi;
pub mod routes;
pub mod state;

use axum::{Router, middleware, routing::get};
use reelbox_web::middleware::{SecurityHeaders, request_id_middleware, security_headers_middleware};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Where the sprite images referenced by `PokéAPI` are served from.
pub const SPRITE_SOURCE: &str = "https://raw.githubusercontent.com";

/// Build the full application router.
///
/// Layers, innermost first: request id, security headers, HTTP trace span.
/// Sentry layers are added by the binary.
pub fn build_router(state: AppState) -> Router {
    let security = SecurityHeaders::new(&[SPRITE_SOURCE], false);
    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

    Router::new()
        .route("/health", get(reelbox_web::health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(routes::pokemon::not_found)
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(middleware::from_fn_with_state(
            security,
            security_headers_middleware,
        ))
        .layer(reelbox_web::trace::http_trace_layer())
}
