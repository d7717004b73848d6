//! HTTP middleware shared by both sites.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers
//! 2. `TraceLayer` with [`crate::trace::RequestSpan`]
//! 3. Request ID (recorded on the request span)
//! 4. Security headers

pub mod request_id;
pub mod security_headers;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::{SecurityHeaders, security_headers_middleware};
