//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};

use reelbox_core::{Email, UserId, Username};

/// A site account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Public display name, unique.
    pub username: Username,
    /// Email address, unique (case-insensitive).
    pub email: Email,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A stored profile picture.
#[derive(Debug, Clone)]
pub struct ProfilePicture {
    /// `image/png` or `image/jpeg`.
    pub content_type: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// When the picture was last replaced.
    pub updated_at: DateTime<Utc>,
}

impl ProfilePicture {
    /// The picture as a `data:` URI for an `<img src>`.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.data))
    }
}
