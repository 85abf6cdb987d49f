use serde_json::Value;
use std::fmt;

/// Locations checked, in order, for the installation id of an event.
/// Sentry puts the installation at the top level of most payloads, older
/// integration events nest it under `data`.
const INSTALLATION_ID_POINTERS: &[&str] = &[
    "/installation/uuid",
    "/installation/id",
    "/data/installation/uuid",
    "/data/installation/id",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstallationId(String);

impl InstallationId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        InstallationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstallationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PayloadError {
    #[error("payload does not contain an installation id")]
    MissingInstallationId,
}

pub fn extract_installation_id(payload: &Value) -> Result<InstallationId, PayloadError> {
    INSTALLATION_ID_POINTERS
        .iter()
        .filter_map(|pointer| payload.pointer(pointer))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(InstallationId::new(s.as_str())),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(InstallationId::new(n.to_string())),
            _ => None,
        })
        .ok_or(PayloadError::MissingInstallationId)
}
