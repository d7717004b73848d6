//! Tracing and Sentry initialization.
//!
//! Sentry must be initialized before the tracing subscriber so the Sentry
//! tracing layer has a client to report to.

use std::borrow::Cow;

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Sentry settings read from each binary's configuration.
#[derive(Debug, Clone, Default)]
pub struct SentrySettings {
    /// Sentry DSN; Sentry stays disabled when unset.
    pub dsn: Option<String>,
    /// Environment tag (e.g. `production`).
    pub environment: Option<String>,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
///
/// `release` should be `sentry::release_name!()` expanded in the binary crate.
#[must_use]
pub fn init_sentry(
    settings: &SentrySettings,
    release: Option<Cow<'static, str>>,
) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release,
            environment: settings.environment.clone().map(Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Set `LOG_FORMAT=json` for one JSON
/// object per event (for log shippers); the default is human-readable text.
pub fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentry_disabled_without_dsn() {
        let guard = init_sentry(&SentrySettings::default(), None);
        assert!(guard.is_none());
    }
}
