//! Review domain type.

use chrono::{DateTime, Utc};

use reelbox_core::{ReviewId, UserId};

/// Display format for review timestamps.
pub const REVIEW_DATE_FORMAT: &str = "%B %d, %Y at %H:%M:%S";

/// A movie review joined with its commenter's current username.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: ReviewId,
    pub commenter_id: UserId,
    /// Username at read time, so renames show up on old reviews.
    pub commenter: String,
    pub content: String,
    pub imdb_id: String,
    pub movie_title: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// `created_at` formatted for display, in UTC.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.created_at.format(REVIEW_DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_display_date() {
        let review = Review {
            id: ReviewId::new(1),
            commenter_id: UserId::new(1),
            commenter: "ana".to_string(),
            content: "Great fun.".to_string(),
            imdb_id: "tt0133093".to_string(),
            movie_title: "The Matrix".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap(),
        };
        assert_eq!(review.display_date(), "March 07, 2026 at 09:05:01");
    }
}
