use crate::config::LoggingConfig;
use sentry::types::{Dsn, ParseDsnError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "info";

/// Installs the global tracing subscriber. Log level comes from `RUST_LOG`.
///
/// When a Sentry DSN is configured, error events are also reported to Sentry.
/// The returned guard flushes pending events on drop and must be held until
/// the process exits.
pub fn init(config: Option<&LoggingConfig>) -> Result<Option<sentry::ClientInitGuard>, ParseDsnError> {
    let guard = match config {
        Some(config) => {
            let dsn: Dsn = config.sentry_dsn.parse()?;
            Some(sentry::init(sentry::ClientOptions {
                dsn: Some(dsn),
                release: sentry::release_name!(),
                environment: config.environment.clone().map(Into::into),
                ..Default::default()
            }))
        }
        None => None,
    };

    let sentry_layer = guard
        .as_ref()
        .map(|_| sentry::integrations::tracing::layer());

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_layer)
        .init();

    Ok(guard)
}
