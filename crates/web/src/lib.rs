//! Reelbox Web - HTTP plumbing shared by the Reelbox binaries.
//!
//! Both sites are Axum applications with the same ambient stack:
//!
//! - [`config`] - environment variable helpers and `ConfigError`
//! - [`telemetry`] - `tracing` subscriber and Sentry initialization
//! - [`middleware`] - request ids and security headers
//! - [`trace`] - the request span used by `TraceLayer`
//! - [`shutdown`] - graceful shutdown on Ctrl+C / SIGTERM

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod middleware;
pub mod shutdown;
pub mod telemetry;
pub mod trace;

pub use shutdown::shutdown_signal;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}
