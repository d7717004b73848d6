//! Environment variable helpers shared by the binaries' configuration.
//!
//! Each binary loads `.env` via `dotenvy`, then builds its own config struct
//! from these helpers.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::telemetry::SentrySettings;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Get a required environment variable. Empty values count as missing.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if unset or empty.
pub fn get_required_env(key: &str) -> Result<String, ConfigError> {
    get_optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
#[must_use]
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
#[must_use]
pub fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the value is set but unparseable.
pub fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match get_optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

/// Parse a base URL from the environment, falling back to `default`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the value is not an absolute
/// http(s) URL.
pub fn base_url_env_or_default(key: &str, default: &str) -> Result<Url, ConfigError> {
    normalize_base_url(&get_env_or_default(key, default))
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
}

/// Parse `raw` as an http(s) URL and make sure the path ends in `/`, so
/// `Url::join("pokemon/ditto")` appends instead of replacing the last segment.
///
/// # Errors
///
/// Returns a description of the problem if `raw` is not an http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Reject values that look like a copied `.env.example` placeholder.
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` naming the matched pattern.
pub fn reject_placeholder(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}

/// Read `SENTRY_DSN` and `SENTRY_ENVIRONMENT`.
#[must_use]
pub fn sentry_settings_from_env() -> SentrySettings {
    SentrySettings {
        dsn: get_optional_env("SENTRY_DSN"),
        environment: get_optional_env("SENTRY_ENVIRONMENT"),
    }
}
