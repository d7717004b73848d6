//! Reelbox Pokédex - Pokémon browser.
//!
//! This binary serves the Pokédex on port 3001 by default.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reelbox_pokedex::{build_router, config::PokedexConfig, state::AppState};

#[tokio::main]
async fn main() {
    // Missing .env is fine; variables may come from the environment
    let _ = dotenvy::dotenv();

    let config = PokedexConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = reelbox_web::telemetry::init_sentry(&config.sentry, sentry::release_name!());
    reelbox_web::telemetry::init_tracing("reelbox_pokedex=info,tower_http=debug");

    let addr = config.socket_addr();
    let state = AppState::new(config);

    let app = build_router(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    tracing::info!("pokedex listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(reelbox_web::shutdown_signal())
        .await
        .expect("Server error");
}
