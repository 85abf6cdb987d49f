//! Classification of incoming Sentry webhooks.
//!
//! Sentry names the resource a webhook is about in the `Sentry-Hook-Resource`
//! header. The raw header is normalized once at the boundary and then parsed
//! into an [`EventCategory`].

use crate::metrics::EventCounter;
use http::HeaderMap;
use std::fmt;

pub const HOOK_RESOURCE_HEADER: &str = "sentry-hook-resource";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventCategory {
    Installation,
    Uninstallation,
    EventAlert,
    MetricAlert,
    Issue,
    Error,
    /// Anything else, including an empty or missing header. Holds the raw value.
    Other(String),
}

impl EventCategory {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "installation" => EventCategory::Installation,
            "uninstallation" => EventCategory::Uninstallation,
            "event_alert" => EventCategory::EventAlert,
            "metric_alert" => EventCategory::MetricAlert,
            "issue" => EventCategory::Issue,
            "error" => EventCategory::Error,
            other => EventCategory::Other(other.to_string()),
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::parse(&resource_from_headers(headers))
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventCategory::Installation => "installation",
            EventCategory::Uninstallation => "uninstallation",
            EventCategory::EventAlert => "event_alert",
            EventCategory::MetricAlert => "metric_alert",
            EventCategory::Issue => "issue",
            EventCategory::Error => "error",
            EventCategory::Other(raw) => raw,
        }
    }

    /// The counter incremented when an event of this category is received.
    /// Alerts are not counted.
    pub fn counter(&self) -> Option<EventCounter> {
        match self {
            EventCategory::Installation => Some(EventCounter::Install),
            EventCategory::Uninstallation => Some(EventCounter::Uninstall),
            EventCategory::EventAlert | EventCategory::MetricAlert => None,
            EventCategory::Issue | EventCategory::Error => Some(EventCounter::Unsupported),
            EventCategory::Other(_) => Some(EventCounter::Unknown),
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joins every value of the resource header, in order, with no separator.
/// A missing header yields an empty string.
pub fn resource_from_headers(headers: &HeaderMap) -> String {
    headers
        .get_all(HOOK_RESOURCE_HEADER)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect()
}
