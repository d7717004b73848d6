//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Nothing but whitespace was submitted.
    #[error("username is required")]
    Empty,
    /// Longer than [`Username::MAX_LENGTH`] characters.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Contains a character that cannot appear in a profile URL.
    #[error("username cannot contain '{0}'")]
    InvalidCharacter(char),
    /// `.` or `..`, which browsers collapse out of a profile URL.
    #[error("username cannot be only dots")]
    OnlyDots,
}

/// A public username.
///
/// Usernames are shown on reviews and used in `/user/<username>` links, so
/// path separators, `?`, `#`, control characters, and names made only of
/// dots are rejected.
///
/// ```
/// use reelbox_core::Username;
///
/// assert!(Username::parse("film_buff").is_ok());
/// assert!(Username::parse("a/b").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum username length in characters.
    pub const MAX_LENGTH: usize = 40;

    /// Parse a username.
    ///
    /// # Errors
    ///
    /// Returns [`UsernameError`] if the trimmed input is empty, too long, or
    /// contains a forbidden character.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(UsernameError::Empty);
        }
        if s.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if let Some(c) = s
            .chars()
            .find(|c| c.is_control() || matches!(c, '/' | '\\' | '?' | '#' | '%'))
        {
            return Err(UsernameError::InvalidCharacter(c));
        }
        if s.chars().all(|c| c == '.') {
            return Err(UsernameError::OnlyDots);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the username and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Username::parse(" neo ").unwrap().as_str(), "neo");
        assert!(Username::parse("Jean-Luc Picard").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(Username::parse(&"u".repeat(40)).is_ok());
        assert_eq!(
            Username::parse(&"u".repeat(41)),
            Err(UsernameError::TooLong { max: 40 })
        );
    }

    #[test]
    fn test_parse_rejects_url_characters() {
        assert_eq!(
            Username::parse("../admin"),
            Err(UsernameError::InvalidCharacter('/'))
        );
        assert_eq!(
            Username::parse("who?"),
            Err(UsernameError::InvalidCharacter('?'))
        );
    }

    #[test]
    fn test_parse_rejects_dot_segments() {
        assert_eq!(Username::parse("."), Err(UsernameError::OnlyDots));
        assert_eq!(Username::parse(".."), Err(UsernameError::OnlyDots));
        assert_eq!(Username::parse("..."), Err(UsernameError::OnlyDots));
        assert!(Username::parse("j.r.").is_ok());
    }
}
