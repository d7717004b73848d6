//! Per-session CSRF tokens.
//!
//! Every form renders the session token as a hidden `csrf_token` field and
//! every POST handler calls [`verify_csrf`] before acting.

use axum::{extract::FromRequestParts, http::request::Parts};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;

/// The session's CSRF token, created on first use.
#[derive(Clone, Debug)]
pub struct CsrfToken(pub String);

impl CsrfToken {
    /// Generate a new random token (128-bit, base64url-encoded).
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Get the token value for use in templates.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Load the session's token, storing a fresh one if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn for_session(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        if let Some(token) = session.get::<String>(session_keys::CSRF_TOKEN).await? {
            return Ok(Self(token));
        }
        let token = Self::generate();
        session.insert(session_keys::CSRF_TOKEN, &token.0).await?;
        Ok(token)
    }
}

impl<S> FromRequestParts<S> for CsrfToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;
        Ok(Self::for_session(session).await?)
    }
}

/// Check a submitted token against the session's.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the session has no token or the tokens
/// differ.
pub async fn verify_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    let expected: Option<String> = session.get(session_keys::CSRF_TOKEN).await?;
    match expected {
        Some(expected) if constant_time_eq(expected.as_bytes(), submitted.as_bytes()) => Ok(()),
        _ => {
            tracing::warn!("CSRF token mismatch");
            Err(AppError::BadRequest("invalid CSRF token".to_string()))
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
