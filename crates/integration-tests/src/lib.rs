//! Smoke tests against running Reelbox servers.
//!
//! Every test is `#[ignore]`d; they need both servers up, the movie site
//! migrated, and a working `OMDB_API_KEY`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo run -p reelbox-cli -- migrate
//! cargo run -p reelbox-pokedex &
//! cargo run -p reelbox-movies &
//! cargo test -p reelbox-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `POKEDEX_BASE_URL` - default `http://localhost:3001`
//! - `MOVIES_BASE_URL` - default `http://localhost:3000`

use reqwest::Client;
use reqwest::redirect::Policy;

/// Base URL of the Pokédex.
#[must_use]
pub fn pokedex_base_url() -> String {
    base_url("POKEDEX_BASE_URL", "http://localhost:3001")
}

/// Base URL of the movie site.
#[must_use]
pub fn movies_base_url() -> String {
    base_url("MOVIES_BASE_URL", "http://localhost:3000")
}

fn base_url(var: &str, default: &str) -> String {
    std::env::var(var)
        .unwrap_or_else(|_| default.to_owned())
        .trim_end_matches('/')
        .to_owned()
}

/// A client that keeps cookies and does not follow redirects, so tests can
/// assert on `Location`.
///
/// # Errors
///
/// Returns `reqwest::Error` if the TLS backend can't be initialised.
pub fn client() -> reqwest::Result<Client> {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
}

/// The CSRF token embedded in a rendered form.
#[must_use]
pub fn csrf_from(body: &str) -> Option<&str> {
    let marker = "name=\"csrf_token\" value=\"";
    let start = body.find(marker)? + marker.len();
    let rest = body.get(start..)?;
    let len = rest.find('"')?;
    rest.get(..len)
}

/// A username nobody has registered yet.
#[must_use]
pub fn unique_username() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("smoke-{}", id.get(..12).unwrap_or(&id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csrf_from() {
        let body = r#"<form><input type="hidden" name="csrf_token" value="abc_123"></form>"#;
        assert_eq!(csrf_from(body), Some("abc_123"));
        assert_eq!(csrf_from("<p>no form</p>"), None);
    }

    #[test]
    fn test_unique_username_fits_limit() {
        let name = unique_username();
        assert!(name.starts_with("smoke-"));
        assert!(name.len() <= 40);
        assert_ne!(name, unique_username());
    }
}
