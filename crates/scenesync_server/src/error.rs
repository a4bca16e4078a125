//! Error types for the storage server.

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the storage server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServerError {
    /// Path is not a room resource.
    #[error("not a room path: {0}")]
    InvalidPath(String),

    /// Room id contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid room id: {0}")]
    InvalidRoomId(String),

    /// Room has never been written.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// Envelope exceeds the configured limit.
    #[error("payload too large: {size} bytes, limit {max}")]
    PayloadTooLarge {
        /// Size of the rejected body.
        size: usize,
        /// Configured limit.
        max: usize,
    },

    /// The store is full.
    #[error("room capacity exhausted ({0} rooms)")]
    CapacityExhausted(usize),
}

impl ServerError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::InvalidPath(_) | ServerError::InvalidRoomId(_) => 400,
            ServerError::RoomNotFound(_) => 404,
            ServerError::PayloadTooLarge { .. } => 413,
            ServerError::CapacityExhausted(_) => 507,
        }
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
