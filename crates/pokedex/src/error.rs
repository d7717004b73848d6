//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. "No such Pokémon" is not an
//! `AppError`: the pages render that case themselves.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::pokeapi::PokeApiError;

/// Application-level error type for the Pokédex.
#[derive(Debug, Error)]
pub enum AppError {
    /// `PokéAPI` request failed.
    #[error("PokéAPI error: {0}")]
    Upstream(#[from] PokeApiError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        // Don't expose internal error details to clients
        let (status, message) = match &self {
            Self::Upstream(PokeApiError::RateLimited(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "PokéAPI is busy, try again shortly",
            ),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "External service error"),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
