//! Metrics definitions for the webhook receiver.

use shared::metrics_defs::{MetricDef, MetricType};

pub const INSTALL_EVENTS: MetricDef = MetricDef {
    name: "total_install_events",
    metric_type: MetricType::Counter,
    description: "Total integration installations",
};

pub const UNINSTALL_EVENTS: MetricDef = MetricDef {
    name: "total_uninstall_events",
    metric_type: MetricType::Counter,
    description: "Total integration uninstallations",
};

pub const UNSUPPORTED_EVENTS: MetricDef = MetricDef {
    name: "total_unsupported_events",
    metric_type: MetricType::Counter,
    description: "Total unsupported events",
};

pub const UNKNOWN_EVENTS: MetricDef = MetricDef {
    name: "total_unknown_events",
    metric_type: MetricType::Counter,
    description: "Total unknown events",
};

pub const ALL_METRICS: &[MetricDef] = &[
    INSTALL_EVENTS,
    UNINSTALL_EVENTS,
    UNSUPPORTED_EVENTS,
    UNKNOWN_EVENTS,
];
