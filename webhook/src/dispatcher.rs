use crate::event::EventCategory;
use crate::metrics::WebhookMetrics;
use crate::payload::extract_installation_id;
use crate::store::InstallationStore;
use http::HeaderMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Body sent back to Sentry for every delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub success: bool,
}

impl Acknowledgement {
    pub const SUCCESS: Acknowledgement = Acknowledgement { success: true };
}

/// Classifies incoming Sentry webhooks and applies their side effects.
pub struct Dispatcher {
    metrics: Arc<WebhookMetrics>,
    store: Arc<dyn InstallationStore>,
}

impl Dispatcher {
    pub fn new(metrics: Arc<WebhookMetrics>, store: Arc<dyn InstallationStore>) -> Self {
        Dispatcher { metrics, store }
    }

    /// Handles a single delivery. Sentry is always acknowledged with success:
    /// unknown event types are counted, processing failures are only logged.
    pub async fn handle(&self, headers: &HeaderMap, body: &[u8]) -> Acknowledgement {
        tracing::info!("Receiving Sentry event");

        let category = EventCategory::from_headers(headers);
        let payload = parse_payload(body);
        self.dispatch(&category, &payload).await;

        Acknowledgement::SUCCESS
    }

    pub async fn dispatch(&self, category: &EventCategory, payload: &Value) {
        if let Some(counter) = category.counter() {
            self.metrics.incr(counter);
        }

        match category {
            EventCategory::Installation => tracing::info!("Installation request"),
            EventCategory::Uninstallation => self.uninstall(payload).await,
            EventCategory::EventAlert => tracing::info!("Event alert"),
            EventCategory::MetricAlert => tracing::info!("Metric alert"),
            EventCategory::Issue => tracing::info!("Issue request"),
            EventCategory::Error => tracing::info!("Error request"),
            EventCategory::Other(raw) => tracing::warn!("Unknown Sentry event type: {raw}"),
        }
    }

    async fn uninstall(&self, payload: &Value) {
        let id = match extract_installation_id(payload) {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Uninstallation request cannot be applied");
                return;
            }
        };

        tracing::info!("Uninstallation request for {id}");

        // Sentry is not told about failures, so they are only visible here.
        match self.store.delete_installation_by_id(&id).await {
            Ok(true) => tracing::debug!(installation_id = %id, "Deleted installation"),
            Ok(false) => {
                tracing::debug!(installation_id = %id, "No installation record to delete")
            }
            Err(e) => {
                tracing::error!(installation_id = %id, error = %e, "Failed to delete installation")
            }
        }
    }
}

fn parse_payload(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }

    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Webhook body is not valid JSON");
        Value::Null
    })
}
