//! Session storage error types.

use thiserror::Error;

/// Session storage error variants.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read session: {0}")]
    ReadFailed(String),

    #[error("failed to write session: {0}")]
    WriteFailed(String),

    #[error("failed to clear session: {0}")]
    ClearFailed(String),

    #[error("session storage not available: {0}")]
    NotAvailable(String),
}
