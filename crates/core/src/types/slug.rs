//! `PokéAPI` resource names.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Empty input.
    #[error("name cannot be empty")]
    Empty,
    /// Longer than [`Slug::MAX_LENGTH`].
    #[error("name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Contains something other than `a-z`, `0-9`, or `-`.
    #[error("'{0}' is not a valid name")]
    Invalid(String),
}

/// A lowercase resource name as used in `PokéAPI` URLs (`mr-mime`,
/// `porygon2`, `solar-power`).
///
/// Input is trimmed and lowercased before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum slug length.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a resource name.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] if the normalized input is empty, too long, or
    /// contains characters outside `[a-z0-9-]`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        let s = s.trim().to_ascii_lowercase();
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(SlugError::Invalid(s));
        }
        Ok(Self(s))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
