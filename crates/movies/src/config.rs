//! Movie site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MOVIES_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `MOVIES_BASE_URL` - Public URL for the site
//! - `OMDB_API_KEY` - OMDb API key
//!
//! ## Optional
//! - `MOVIES_HOST` - Bind address (default: 127.0.0.1)
//! - `MOVIES_PORT` - Listen port (default: 3000)
//! - `OMDB_BASE_URL` - OMDb endpoint (default: <https://www.omdbapi.com/>)
//! - `OMDB_MAX_SEARCH_PAGES` - Result pages fetched per search (default: 5)
//! - `MOVIES_TRUST_PROXY` - `true` to rate limit by `X-Forwarded-For` /
//!   `X-Real-IP` instead of the peer address (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reelbox_web::config::{
    ConfigError, base_url_env_or_default, get_env_or_default, get_optional_env,
    get_required_env, normalize_base_url, parse_env_or_default, reject_placeholder,
    sentry_settings_from_env,
};
use reelbox_web::telemetry::SentrySettings;
use secrecy::SecretString;
use url::Url;

const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
const DEFAULT_MAX_SEARCH_PAGES: u32 = 5;
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Movie site application configuration.
#[derive(Debug, Clone)]
pub struct MoviesConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Whether a reverse proxy in front sets the client address headers
    pub trust_proxy: bool,
    /// OMDb client configuration
    pub omdb: OmdbConfig,
    /// Error tracking
    pub sentry: SentrySettings,
}

/// OMDb client configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct OmdbConfig {
    /// API key sent as `apikey`
    pub api_key: SecretString,
    /// Endpoint; always ends with `/`
    pub base_url: Url,
    /// Upper bound on result pages requested per search
    pub max_search_pages: u32,
    /// How long successful responses stay cached
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for OmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("max_search_pages", &self.max_search_pages)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl OmdbConfig {
    /// Settings pointing at `base_url` with default limits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an http(s) URL.
    pub fn new(api_key: SecretString, base_url: &str) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("OMDB_BASE_URL".to_string(), e))?;
        Ok(Self {
            api_key,
            base_url,
            max_search_pages: DEFAULT_MAX_SEARCH_PAGES,
            cache_ttl: DEFAULT_CACHE_TTL,
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        let api_key = get_required_env("OMDB_API_KEY")?;
        reject_placeholder(&api_key, "OMDB_API_KEY")?;

        let max_search_pages =
            parse_env_or_default("OMDB_MAX_SEARCH_PAGES", DEFAULT_MAX_SEARCH_PAGES)?;
        if max_search_pages == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "OMDB_MAX_SEARCH_PAGES".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url: base_url_env_or_default("OMDB_BASE_URL", DEFAULT_OMDB_BASE_URL)?,
            max_search_pages,
            cache_ttl: DEFAULT_CACHE_TTL,
        })
    }
}

impl MoviesConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// look like placeholders.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("MOVIES_DATABASE_URL")?;
        let host = get_env_or_default("MOVIES_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MOVIES_HOST".to_string(), e.to_string()))?;
        let port = parse_env_or_default("MOVIES_PORT", 3000_u16)?;
        let base_url = get_required_env("MOVIES_BASE_URL")?;
        normalize_base_url(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("MOVIES_BASE_URL".to_string(), e))?;

        let trust_proxy = parse_env_or_default("MOVIES_TRUST_PROXY", false)?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            trust_proxy,
            omdb: OmdbConfig::from_env()?,
            sentry: sentry_settings_from_env(),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (session cookie gets `Secure`).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    get_optional_env(primary_key)
        .or_else(|| get_optional_env("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Database URL for tooling that shares this crate's schema (the CLI).
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if neither variable is set.
pub fn database_url_from_env() -> Result<SecretString, ConfigError> {
    get_database_url("MOVIES_DATABASE_URL")
}
