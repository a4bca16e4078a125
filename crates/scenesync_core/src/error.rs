//! Error types for SceneSync core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in SceneSync core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Ciphertext failed integrity verification (tampered data or wrong key).
    #[error("authentication failed: {message}")]
    Authentication {
        /// Description of the failure.
        message: String,
    },

    /// Encryption failed.
    #[error("encryption failed: {message}")]
    EncryptionFailed {
        /// Description of the failure.
        message: String,
    },

    /// Key material has an unsupported length.
    #[error("invalid key size: expected 16 or 32 bytes, got {actual}")]
    InvalidKeySize {
        /// Actual size in bytes.
        actual: usize,
    },

    /// Key text could not be decoded.
    #[error("invalid key encoding: {message}")]
    InvalidKeyEncoding {
        /// Description of the problem.
        message: String,
    },
}

impl CoreError {
    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates an encryption failure error.
    pub fn encryption_failed(message: impl Into<String>) -> Self {
        Self::EncryptionFailed {
            message: message.into(),
        }
    }

    /// Creates an invalid key size error.
    pub fn invalid_key_size(actual: usize) -> Self {
        Self::InvalidKeySize { actual }
    }

    /// Creates an invalid key encoding error.
    pub fn invalid_key_encoding(message: impl Into<String>) -> Self {
        Self::InvalidKeyEncoding {
            message: message.into(),
        }
    }

    /// Returns true if the error is caused by bad key material rather than data.
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidKeySize { .. } | CoreError::InvalidKeyEncoding { .. }
        )
    }
}
