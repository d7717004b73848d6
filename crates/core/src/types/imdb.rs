//! IMDb title identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`ImdbId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a valid IMDb id")]
pub struct ImdbIdError(pub String);

/// An IMDb title id such as `tt0133093`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ImdbId(String);

impl ImdbId {
    /// Longest digit run accepted. Real ids have 7 or 8 digits.
    pub const MAX_DIGITS: usize = 12;

    /// Parse an IMDb id: `tt` followed by 1 to [`Self::MAX_DIGITS`] ASCII
    /// digits.
    ///
    /// # Errors
    ///
    /// Returns [`ImdbIdError`] for anything else.
    pub fn parse(s: &str) -> Result<Self, ImdbIdError> {
        let digits = s
            .strip_prefix("tt")
            .ok_or_else(|| ImdbIdError(s.to_owned()))?;
        if digits.is_empty()
            || digits.len() > Self::MAX_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ImdbIdError(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
