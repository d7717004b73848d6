//! Reelbox Core - Shared types library.
//!
//! This crate provides the validated types used by the Reelbox binaries:
//! - `pokedex` - Pokémon browser over the public `PokéAPI`
//! - `movies` - Movie search and review site over the OMDb API
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Every type is constructed through a `parse` function, so
//! holding a value means the input already passed validation.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, usernames, and form input

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
