use crate::config::MetricsConfig;
use metrics_exporter_statsd::{StatsdBuilder, StatsdError};

#[derive(thiserror::Error, Debug)]
pub enum MetricsInitError {
    #[error("could not create statsd exporter: {0}")]
    Statsd(#[from] StatsdError),
    #[error("a metrics recorder is already installed")]
    RecorderAlreadySet,
}

/// Installs the StatsD exporter as the global metrics recorder.
pub fn init(config: &MetricsConfig) -> Result<(), MetricsInitError> {
    let recorder = StatsdBuilder::from(config.statsd_host.clone(), config.statsd_port)
        .build(config.prefix.as_deref())?;

    metrics::set_global_recorder(recorder).map_err(|_| MetricsInitError::RecorderAlreadySet)?;
    shared::metrics_defs::describe_all(webhook::metrics_defs::ALL_METRICS);

    tracing::info!(
        host = %config.statsd_host,
        port = config.statsd_port,
        "Sending metrics to statsd"
    );
    Ok(())
}
