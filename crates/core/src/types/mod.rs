//! Core types for Reelbox.
//!
//! This module provides type-safe wrappers for user input and entity ids.

pub mod email;
pub mod id;
pub mod imdb;
pub mod slug;
pub mod text;
pub mod username;

pub use email::{Email, EmailError};
pub use id::*;
pub use imdb::{ImdbId, ImdbIdError};
pub use slug::{Slug, SlugError};
pub use text::{ReviewText, SearchQuery, TextError};
pub use username::{Username, UsernameError};
