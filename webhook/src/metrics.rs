//! In-process registry for the webhook event counters.
//!
//! Every increment is recorded twice: once in the registry owned by the
//! dispatcher, which backs the admin `/metrics` endpoint and is what tests
//! inspect, and once through the `metrics` facade so that whatever exporter
//! the binary installed (StatsD) sees it too.

use crate::metrics_defs::{INSTALL_EVENTS, UNINSTALL_EVENTS, UNKNOWN_EVENTS, UNSUPPORTED_EVENTS};
use shared::counter;
use shared::metrics_defs::MetricDef;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCounter {
    Install,
    Uninstall,
    Unsupported,
    Unknown,
}

impl EventCounter {
    pub const ALL: [EventCounter; 4] = [
        EventCounter::Install,
        EventCounter::Uninstall,
        EventCounter::Unsupported,
        EventCounter::Unknown,
    ];

    pub const fn def(&self) -> MetricDef {
        match self {
            EventCounter::Install => INSTALL_EVENTS,
            EventCounter::Uninstall => UNINSTALL_EVENTS,
            EventCounter::Unsupported => UNSUPPORTED_EVENTS,
            EventCounter::Unknown => UNKNOWN_EVENTS,
        }
    }
}

#[derive(Debug, Default)]
pub struct WebhookMetrics {
    install: AtomicU64,
    uninstall: AtomicU64,
    unsupported: AtomicU64,
    unknown: AtomicU64,
}

impl WebhookMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, counter: EventCounter) -> &AtomicU64 {
        match counter {
            EventCounter::Install => &self.install,
            EventCounter::Uninstall => &self.uninstall,
            EventCounter::Unsupported => &self.unsupported,
            EventCounter::Unknown => &self.unknown,
        }
    }

    pub fn incr(&self, counter: EventCounter) {
        self.slot(counter).fetch_add(1, Ordering::Relaxed);
        counter!(counter.def()).increment(1);
    }

    pub fn get(&self, counter: EventCounter) -> u64 {
        self.slot(counter).load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> Vec<(MetricDef, u64)> {
        EventCounter::ALL
            .iter()
            .map(|c| (c.def(), self.get(*c)))
            .collect()
    }

    /// Renders all counters in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (def, value) in self.snapshot() {
            // Writing to a String cannot fail
            let _ = writeln!(out, "# HELP {} {}", def.name, def.description);
            let _ = writeln!(out, "# TYPE {} {}", def.name, def.metric_type.exposition_name());
            let _ = writeln!(out, "{} {}", def.name, value);
        }
        out
    }
}
