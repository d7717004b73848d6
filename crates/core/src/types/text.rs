//! Length-bounded free text submitted through forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors for length-bounded text fields.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// Nothing but whitespace was submitted.
    #[error("this field is required")]
    Empty,
    /// Fewer characters than the field minimum.
    #[error("must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// More characters than the field maximum.
    #[error("must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Trim `s` and check its length in characters against `min..=max`.
fn bounded(s: &str, min: usize, max: usize) -> Result<String, TextError> {
    let s = s.trim();
    let len = s.chars().count();
    if len == 0 {
        return Err(TextError::Empty);
    }
    if len < min {
        return Err(TextError::TooShort { min });
    }
    if len > max {
        return Err(TextError::TooLong { max });
    }
    Ok(s.to_owned())
}

/// A movie search query (1-100 characters after trimming).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Maximum query length.
    pub const MAX_LENGTH: usize = 100;

    /// Parse a search query.
    ///
    /// # Errors
    ///
    /// Returns [`TextError`] if the trimmed query is empty or too long.
    pub fn parse(s: &str) -> Result<Self, TextError> {
        bounded(s, 1, Self::MAX_LENGTH).map(Self)
    }

    /// Returns the query as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The body of a movie review (5-500 characters after trimming).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ReviewText(String);

impl ReviewText {
    /// Minimum review length.
    pub const MIN_LENGTH: usize = 5;
    /// Maximum review length.
    pub const MAX_LENGTH: usize = 500;

    /// Parse review text.
    ///
    /// # Errors
    ///
    /// Returns [`TextError`] if the trimmed text is outside 5-500 characters.
    pub fn parse(s: &str) -> Result<Self, TextError> {
        bounded(s, Self::MIN_LENGTH, Self::MAX_LENGTH).map(Self)
    }

    /// Returns the review as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the review and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_trims() {
        let q = SearchQuery::parse("  star wars ").unwrap();
        assert_eq!(q.as_str(), "star wars");
    }

    #[test]
    fn test_search_query_bounds() {
        assert_eq!(SearchQuery::parse(""), Err(TextError::Empty));
        assert!(SearchQuery::parse(&"x".repeat(100)).is_ok());
        assert_eq!(
            SearchQuery::parse(&"x".repeat(101)),
            Err(TextError::TooLong { max: 100 })
        );
    }

    #[test]
    fn test_review_text_bounds() {
        assert_eq!(
            ReviewText::parse("meh"),
            Err(TextError::TooShort { min: 5 })
        );
        assert!(ReviewText::parse("Loved it").is_ok());
        assert_eq!(
            ReviewText::parse(&"a".repeat(501)),
            Err(TextError::TooLong { max: 500 })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Five two-byte characters.
        assert!(ReviewText::parse("ééééé").is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TextError::Empty.to_string(), "this field is required");
        assert_eq!(
            TextError::TooShort { min: 5 }.to_string(),
            "must be at least 5 characters"
        );
    }
}
