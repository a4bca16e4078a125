//! Server configuration.

/// Configuration for the storage server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Largest accepted envelope in bytes.
    pub max_payload_bytes: usize,
    /// Maximum number of rooms kept in memory.
    pub max_rooms: usize,
}

impl ServerConfig {
    /// Creates a new server configuration.
    pub fn new() -> Self {
        Self {
            max_payload_bytes: 16 * 1024 * 1024,
            max_rooms: 10_000,
        }
    }

    /// Sets the maximum envelope size.
    pub fn with_max_payload_bytes(mut self, max: usize) -> Self {
        self.max_payload_bytes = max;
        self
    }

    /// Sets the maximum number of rooms.
    pub fn with_max_rooms(mut self, max: usize) -> Self {
        self.max_rooms = max;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.max_payload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.max_rooms, 10_000);
    }

    #[test]
    fn config_builder() {
        let config = ServerConfig::new()
            .with_max_payload_bytes(1024)
            .with_max_rooms(2);
        assert_eq!(config.max_payload_bytes, 1024);
        assert_eq!(config.max_rooms, 2);
    }
}
