//! Configuration for HTTP storage.

use crate::error::{SyncError, SyncResult};
use std::time::Duration;

/// Environment variable holding the storage backend URL.
pub const BACKEND_URL_ENV: &str = "SCENESYNC_HTTP_STORAGE_BACKEND_URL";

/// Configuration for the storage backend.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage backend (e.g., "https://storage.example.com").
    pub backend_url: String,
    /// Timeout applied to each storage request.
    pub timeout: Duration,
}

impl StorageConfig {
    /// Creates a new storage configuration.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Reads the backend URL from [`BACKEND_URL_ENV`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the variable is unset or invalid.
    pub fn from_env() -> SyncResult<Self> {
        let url = std::env::var(BACKEND_URL_ENV)
            .map_err(|_| SyncError::configuration(format!("{BACKEND_URL_ENV} is not set")))?;
        let config = Self::new(url);
        config.validate()?;
        Ok(config)
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks that the backend URL is usable.
    pub fn validate(&self) -> SyncResult<()> {
        if self.backend_url.is_empty() {
            return Err(SyncError::configuration("storage backend URL is empty"));
        }
        let rest = self
            .backend_url
            .strip_prefix("https://")
            .or_else(|| self.backend_url.strip_prefix("http://"))
            .ok_or_else(|| {
                SyncError::configuration(format!(
                    "storage backend URL must be http(s): {}",
                    self.backend_url
                ))
            })?;
        if rest.is_empty() {
            return Err(SyncError::configuration("storage backend URL has no host"));
        }
        if self.timeout.is_zero() {
            return Err(SyncError::configuration("storage timeout must be non-zero"));
        }
        Ok(())
    }

    /// Returns the resource URL of a room.
    pub fn room_url(&self, room_id: &str) -> String {
        format!("{}/room/{}", self.backend_url, room_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = StorageConfig::new("https://storage.example.com/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.backend_url, "https://storage.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn room_url() {
        let config = StorageConfig::new("http://localhost:8080");
        assert_eq!(config.room_url("abc"), "http://localhost:8080/room/abc");
    }

    #[test]
    fn rejects_invalid_urls() {
        for url in ["", "ftp://example.com", "example.com", "https://"] {
            let result = StorageConfig::new(url).validate();
            assert!(
                matches!(result, Err(SyncError::Configuration(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = StorageConfig::new("http://localhost").with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
