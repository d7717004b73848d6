//! HTTP middleware for the movie site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers (CSP, frame options, etc.)
//! 4. Request ID (add unique ID to each request)
//! 5. Session layer (tower-sessions)
//! 6. Rate limiting on login/registration POSTs (governor)

pub mod auth;
pub mod csrf;
pub mod rate_limit;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use csrf::{CsrfToken, verify_csrf};
pub use rate_limit::auth_rate_limiter;
pub use session::create_session_layer;
