//! Business logic services for the movie site.
//!
//! # Services
//!
//! - `auth` - Registration, password login, and account changes

pub mod auth;
