//! Error types for the protocol crate.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while framing or parsing scene data.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The envelope is structurally invalid.
    #[error("malformed envelope: {message}")]
    Malformed {
        /// Description of the problem.
        message: String,
    },

    /// The decrypted payload is not a valid element array.
    #[error("invalid scene payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Encryption or decryption failed.
    #[error(transparent)]
    Crypto(#[from] scenesync_core::CoreError),
}

impl ProtocolError {
    /// Creates a malformed envelope error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}
