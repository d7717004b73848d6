//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::PokedexConfig;
use crate::pokeapi::PokeClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PokedexConfig,
    poke: PokeClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: PokedexConfig) -> Self {
        let poke = PokeClient::new(&config.pokeapi);
        Self {
            inner: Arc::new(AppStateInner { config, poke }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &PokedexConfig {
        &self.inner.config
    }

    /// Get a reference to the `PokéAPI` client.
    #[must_use]
    pub fn poke(&self) -> &PokeClient {
        &self.inner.poke
    }
}
