//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Neither site runs any JavaScript, so the CSP forbids scripts outright.
//! The only per-site difference is where images may be loaded from.

use axum::{
    extract::{Request, State},
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// CSP used if the configured one is not a valid header value.
const FALLBACK_CSP: &str = "default-src 'none'; style-src 'self'; img-src 'self'; \
                            form-action 'self'; base-uri 'self'; frame-ancestors 'none'";

/// Per-site security header configuration.
///
/// Install with `axum::middleware::from_fn_with_state(headers, security_headers_middleware)`.
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    csp: HeaderValue,
}

impl SecurityHeaders {
    /// Build the policy allowing images from `'self'` plus `img_sources`.
    ///
    /// `upgrade_insecure` adds `upgrade-insecure-requests`; leave it off for
    /// plain-HTTP local development.
    #[must_use]
    pub fn new(img_sources: &[&str], upgrade_insecure: bool) -> Self {
        let mut img_src = String::from("'self'");
        for source in img_sources {
            img_src.push(' ');
            img_src.push_str(source);
        }

        let mut policy = format!(
            "default-src 'none'; \
             script-src 'none'; \
             style-src 'self'; \
             font-src 'self'; \
             img-src {img_src}; \
             connect-src 'self'; \
             frame-src 'none'; \
             object-src 'none'; \
             base-uri 'self'; \
             form-action 'self'; \
             frame-ancestors 'none'"
        );
        if upgrade_insecure {
            policy.push_str("; upgrade-insecure-requests");
        }

        let csp = HeaderValue::from_str(&policy).unwrap_or_else(|e| {
            tracing::warn!("Invalid CSP, using fallback: {e}");
            HeaderValue::from_static(FALLBACK_CSP)
        });

        Self { csp }
    }

    /// The rendered `Content-Security-Policy` header value.
    #[must_use]
    pub const fn content_security_policy(&self) -> &HeaderValue {
        &self.csp
    }
}

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: same-origin`
/// - `Content-Security-Policy` from [`SecurityHeaders`]
/// - `Permissions-Policy` denying sensors, camera, microphone, payment
/// - `Cache-Control: no-store` unless the handler set its own
/// - `Cross-Origin-Opener-Policy: same-origin`
pub async fn security_headers_middleware(
    State(config): State<SecurityHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("same-origin"));
    headers.insert(CONTENT_SECURITY_POLICY, config.csp.clone());

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "accelerometer=(), camera=(), geolocation=(), gyroscope=(), \
             magnetometer=(), microphone=(), payment=(), usb=()",
        ),
    );

    // Pages carry per-user content (names, CSRF tokens)
    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    }

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}
