use crate::config::ValidationError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("installation store error: {0}")]
    Store(#[from] StoreError),
}
