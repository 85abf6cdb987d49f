use crate::payload::InstallationId;
use crate::store::{InstallationStore, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Store double that records every delete it is asked to perform.
/// A failing store records the call and then returns an error.
pub struct RecordingStore {
    deleted: Mutex<Vec<InstallationId>>,
    fail: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        RecordingStore {
            deleted: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        RecordingStore {
            deleted: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn deleted(&self) -> Vec<InstallationId> {
        self.deleted.lock().clone()
    }
}

#[async_trait]
impl InstallationStore for RecordingStore {
    async fn delete_installation_by_id(&self, id: &InstallationId) -> Result<bool, StoreError> {
        self.deleted.lock().push(id.clone());
        if self.fail {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(true)
    }

    fn is_ready(&self) -> bool {
        !self.fail
    }
}
