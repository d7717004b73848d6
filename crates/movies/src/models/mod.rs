//! Domain models for the movie site.

pub mod review;
pub mod session;
pub mod user;

pub use review::Review;
pub use session::{CurrentUser, keys as session_keys};
pub use user::{ProfilePicture, User};
