//! HTTP route handlers for the Pokédex.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Every Pokémon name, linked
//! GET  /pokemon/{name}    - Pokémon details
//! GET  /ability/{name}    - Pokémon that can have an ability
//! GET  /health            - Liveness check
//! GET  /static/*          - Stylesheet
//! *                       - 404 page
//! ```

pub mod pokemon;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the page routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pokemon::index))
        .route("/pokemon/{name}", get(pokemon::info))
        .route("/ability/{name}", get(pokemon::ability))
}
