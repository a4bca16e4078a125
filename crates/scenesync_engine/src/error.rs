//! Error types for the sync engine.

use scenesync_core::{CoreError, Element};
use scenesync_protocol::ProtocolError;
use std::fmt;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// The storage request a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    /// Reading the room envelope.
    Fetch,
    /// Writing the room envelope.
    Write,
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageOperation::Fetch => f.write_str("fetch"),
            StorageOperation::Write => f.write_str("write"),
        }
    }
}

/// Errors reported by a sync call.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Network or HTTP failure talking to the storage backend.
    #[error("storage unavailable during {operation}: {message}")]
    StorageUnavailable {
        /// Request that failed.
        operation: StorageOperation,
        /// Error message.
        message: String,
        /// Collection the failed write tried to store.
        attempted: Option<Vec<Element>>,
    },

    /// The remote scene failed integrity verification.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The remote envelope or its payload is structurally invalid.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Missing or invalid backend endpoint, room id or room key.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SyncError {
    /// Creates a fetch failure.
    pub fn fetch_unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            operation: StorageOperation::Fetch,
            message: message.into(),
            attempted: None,
        }
    }

    /// Creates a write failure carrying the collection that was not stored.
    pub fn write_unavailable(message: impl Into<String>, attempted: Vec<Element>) -> Self {
        Self::StorageUnavailable {
            operation: StorageOperation::Write,
            message: message.into(),
            attempted: Some(attempted),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if retrying the sync later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::StorageUnavailable { .. })
    }

    /// Returns the collection a failed write attempted to store.
    ///
    /// When the remote scene was newer this is the merged collection, which
    /// the caller should still adopt locally.
    pub fn attempted_elements(&self) -> Option<&[Element]> {
        match self {
            SyncError::StorageUnavailable {
                attempted: Some(elements),
                ..
            } => Some(elements),
            _ => None,
        }
    }
}

impl From<CoreError> for SyncError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Authentication { message } => SyncError::Authentication(message),
            CoreError::InvalidKeySize { .. } | CoreError::InvalidKeyEncoding { .. } => {
                SyncError::Configuration(format!("invalid room key: {err}"))
            }
            CoreError::EncryptionFailed { message } => {
                SyncError::MalformedPayload(format!("could not seal scene: {message}"))
            }
        }
    }
}

impl From<ProtocolError> for SyncError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Malformed { message } => SyncError::MalformedPayload(message),
            ProtocolError::Payload(e) => SyncError::MalformedPayload(e.to_string()),
            ProtocolError::Crypto(e) => SyncError::from(e),
        }
    }
}
