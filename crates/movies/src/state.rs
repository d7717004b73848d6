//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::MoviesConfig;
use crate::omdb::MovieClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MoviesConfig,
    pool: PgPool,
    omdb: MovieClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Movie site configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: MoviesConfig, pool: PgPool) -> Self {
        let omdb = MovieClient::new(&config.omdb);

        Self {
            inner: Arc::new(AppStateInner { config, pool, omdb }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &MoviesConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the OMDb client.
    #[must_use]
    pub fn omdb(&self) -> &MovieClient {
        &self.inner.omdb
    }
}
