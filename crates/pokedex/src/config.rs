//! Pokédex configuration.
//!
//! Loads configuration from environment variables.
//!
//! # Environment Variables
//!
//! ```bash
//! POKEDEX_HOST=127.0.0.1            # optional
//! POKEDEX_PORT=3001                 # optional
//! POKEAPI_BASE_URL=https://pokeapi.co/api/v2/
//! POKEDEX_LIST_LIMIT=2000           # how many names the index page requests
//! SENTRY_DSN=...                    # optional
//! SENTRY_ENVIRONMENT=production     # optional
//! ```

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reelbox_web::config::{
    ConfigError, base_url_env_or_default, get_env_or_default, parse_env_or_default,
    sentry_settings_from_env,
};
use reelbox_web::telemetry::SentrySettings;
use url::Url;

const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2/";
const DEFAULT_LIST_LIMIT: u32 = 2000;
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Pokédex application configuration.
#[derive(Debug, Clone)]
pub struct PokedexConfig {
    /// Host address to bind to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// `PokéAPI` client settings.
    pub pokeapi: PokeApiConfig,
    /// Error tracking.
    pub sentry: SentrySettings,
}

/// `PokéAPI` client settings.
#[derive(Debug, Clone)]
pub struct PokeApiConfig {
    /// API root; always ends with `/`.
    pub base_url: Url,
    /// `limit` sent with the Pokémon list request.
    pub list_limit: u32,
    /// How long responses stay cached.
    pub cache_ttl: Duration,
}

impl PokeApiConfig {
    /// Settings pointing at `base_url` with default limits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an http(s) URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = reelbox_web::config::normalize_base_url(base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("POKEAPI_BASE_URL".to_string(), e))?;
        Ok(Self {
            base_url,
            list_limit: DEFAULT_LIST_LIMIT,
            cache_ttl: DEFAULT_CACHE_TTL,
        })
    }
}

impl PokedexConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = get_env_or_default("POKEDEX_HOST", "127.0.0.1")
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidEnvVar("POKEDEX_HOST".to_string(), e.to_string())
            })?;
        let port = parse_env_or_default("POKEDEX_PORT", 3001_u16)?;

        let list_limit = parse_env_or_default("POKEDEX_LIST_LIMIT", DEFAULT_LIST_LIMIT)?;
        if list_limit == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "POKEDEX_LIST_LIMIT".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let pokeapi = PokeApiConfig {
            base_url: base_url_env_or_default("POKEAPI_BASE_URL", DEFAULT_POKEAPI_BASE_URL)?,
            list_limit,
            cache_ttl: DEFAULT_CACHE_TTL,
        };

        Ok(Self {
            host,
            port,
            pokeapi,
            sentry: sentry_settings_from_env(),
        })
    }

    /// Get the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
