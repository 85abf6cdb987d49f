//! Persistence of installation records.
//!
//! The receiver only ever removes records: when Sentry reports that the
//! integration was uninstalled, the matching installation is deleted.

use crate::config::StoreConfig;
use crate::payload::InstallationId;
use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait InstallationStore: Send + Sync {
    /// Deletes the installation with the given id.
    /// Returns `Ok(false)` if there was no such installation.
    async fn delete_installation_by_id(&self, id: &InstallationId) -> Result<bool, StoreError>;

    fn is_ready(&self) -> bool;
}

pub fn from_config(config: &StoreConfig) -> Result<Arc<dyn InstallationStore>, StoreError> {
    match config {
        StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreConfig::Postgres {
            url,
            table,
            max_connections,
        } => Ok(Arc::new(PostgresStore::connect_lazy(
            url,
            table,
            *max_connections,
        )?)),
    }
}

pub struct MemoryStore {
    installations: RwLock<HashSet<InstallationId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        tracing::warn!(
            "Using the in-memory installation store. Records are lost on restart, do not use in production."
        );
        MemoryStore {
            installations: RwLock::new(HashSet::new()),
        }
    }

    pub fn insert(&self, id: InstallationId) {
        self.installations.write().insert(id);
    }

    pub fn contains(&self, id: &InstallationId) -> bool {
        self.installations.read().contains(id)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InstallationStore for MemoryStore {
    async fn delete_installation_by_id(&self, id: &InstallationId) -> Result<bool, StoreError> {
        Ok(self.installations.write().remove(id))
    }

    fn is_ready(&self) -> bool {
        true
    }
}

pub struct PostgresStore {
    pool: PgPool,
    delete_statement: String,
}

impl PostgresStore {
    /// Creates the store without opening a connection. Connections are
    /// established on first use, so a database outage does not prevent startup.
    pub fn connect_lazy(url: &Url, table: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            .connect_lazy(url.as_str())?;

        tracing::info!(
            host = url.host_str().unwrap_or_default(),
            table,
            "Using postgres installation store"
        );

        Ok(Self::from_pool(pool, table))
    }

    pub fn from_pool(pool: PgPool, table: &str) -> Self {
        PostgresStore {
            pool,
            delete_statement: delete_statement(table),
        }
    }
}

#[async_trait]
impl InstallationStore for PostgresStore {
    async fn delete_installation_by_id(&self, id: &InstallationId) -> Result<bool, StoreError> {
        let result = sqlx::query(&self.delete_statement)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn is_ready(&self) -> bool {
        !self.pool.is_closed()
    }
}

// Table names are validated as plain identifiers when the config is loaded.
// Quoting keeps their case, which matters for tables like "Install".
fn delete_statement(table: &str) -> String {
    let quoted = table
        .split('.')
        .map(|part| format!("\"{part}\""))
        .collect::<Vec<_>>()
        .join(".");
    format!("DELETE FROM {quoted} WHERE id = $1")
}
