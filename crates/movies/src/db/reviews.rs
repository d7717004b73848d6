//! Review repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use reelbox_core::{ImdbId, ReviewId, ReviewText, UserId};

use super::RepositoryError;
use crate::models::Review;

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    commenter_id: i32,
    commenter: String,
    content: String,
    imdb_id: String,
    movie_title: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::new(row.id),
            commenter_id: UserId::new(row.commenter_id),
            commenter: row.commenter,
            content: row.content,
            imdb_id: row.imdb_id,
            movie_title: row.movie_title,
            created_at: row.created_at,
        }
    }
}

/// A review about to be stored.
#[derive(Debug)]
pub struct NewReview<'a> {
    pub commenter_id: UserId,
    pub content: &'a ReviewText,
    pub imdb_id: &'a ImdbId,
    pub movie_title: &'a str,
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, review: &NewReview<'_>) -> Result<Review, RepositoryError> {
        let row: ReviewRow = sqlx::query_as(
            r"
            WITH inserted AS (
                INSERT INTO reelbox.reviews (commenter_id, content, imdb_id, movie_title)
                VALUES ($1, $2, $3, $4)
                RETURNING id, commenter_id, content, imdb_id, movie_title, created_at
            )
            SELECT i.id, i.commenter_id, u.username AS commenter, i.content,
                   i.imdb_id, i.movie_title, i.created_at
            FROM inserted i
            JOIN reelbox.users u ON u.id = i.commenter_id
            ",
        )
        .bind(review.commenter_id.as_i32())
        .bind(review.content.as_str())
        .bind(review.imdb_id.as_str())
        .bind(review.movie_title)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Reviews of one movie, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_movie(&self, imdb_id: &ImdbId) -> Result<Vec<Review>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT r.id, r.commenter_id, u.username AS commenter, r.content,
                   r.imdb_id, r.movie_title, r.created_at
            FROM reelbox.reviews r
            JOIN reelbox.users u ON u.id = r.commenter_id
            WHERE r.imdb_id = $1
            ORDER BY r.created_at ASC, r.id ASC
            ",
        )
        .bind(imdb_id.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    /// Reviews written by one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, commenter_id: UserId) -> Result<Vec<Review>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT r.id, r.commenter_id, u.username AS commenter, r.content,
                   r.imdb_id, r.movie_title, r.created_at
            FROM reelbox.reviews r
            JOIN reelbox.users u ON u.id = r.commenter_id
            WHERE r.commenter_id = $1
            ORDER BY r.created_at DESC, r.id DESC
            ",
        )
        .bind(commenter_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}
