//! Receiver for Sentry integration webhooks.
//!
//! Sentry posts installation lifecycle and alert notifications to
//! `POST /webhook`. Each delivery is classified by its `Sentry-Hook-Resource`
//! header, counted, and for uninstallations the installation record is
//! deleted. Sentry always receives `{"success": true}`.

pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod event;
pub mod metrics;
pub mod metrics_defs;
pub mod payload;
pub mod service;
pub mod store;

#[cfg(test)]
mod testutils;

use crate::dispatcher::Dispatcher;
use crate::metrics::WebhookMetrics;
use crate::service::WebhookService;
use crate::store::InstallationStore;
use shared::admin_service::{AdminService, AdminState};
use shared::http::run_http_service;
use std::sync::Arc;

pub use errors::WebhookError;

struct AdminHandle {
    metrics: Arc<WebhookMetrics>,
    store: Arc<dyn InstallationStore>,
}

impl AdminState for AdminHandle {
    fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    fn render_metrics(&self) -> String {
        self.metrics.render()
    }
}

pub async fn run(config: config::Config) -> Result<(), WebhookError> {
    config.validate()?;

    let store = store::from_config(&config.store)?;
    let metrics = Arc::new(WebhookMetrics::new());
    let dispatcher = Arc::new(Dispatcher::new(metrics.clone(), store.clone()));

    let webhook_task = run_http_service(
        &config.listener.host,
        config.listener.port,
        WebhookService::new(dispatcher),
    );
    let admin_task = run_http_service(
        &config.admin_listener.host,
        config.admin_listener.port,
        AdminService::<_, WebhookError>::new(Arc::new(AdminHandle { metrics, store })),
    );

    tokio::try_join!(webhook_task, admin_task)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::EventCounter;
    use crate::testutils::RecordingStore;

    #[test]
    fn test_admin_handle() {
        let metrics = Arc::new(WebhookMetrics::new());
        metrics.incr(EventCounter::Install);

        let handle = AdminHandle {
            metrics: metrics.clone(),
            store: Arc::new(RecordingStore::new()),
        };
        assert!(handle.is_ready());
        assert!(handle.render_metrics().contains("\ntotal_install_events 1\n"));

        let handle = AdminHandle {
            metrics,
            store: Arc::new(RecordingStore::failing()),
        };
        assert!(!handle.is_ready());
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_config() {
        let mut config = config::Config::default();
        config.admin_listener = config.listener.clone();
        assert!(matches!(
            run(config).await,
            Err(WebhookError::InvalidConfig(_))
        ));
    }
}
