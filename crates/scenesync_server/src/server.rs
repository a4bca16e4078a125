//! Room resource handlers.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::store::RoomStore;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

const ROOM_PREFIX: &str = "/room/";

/// Status and body produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl Response {
    fn ok(body: Bytes) -> Self {
        Self { status: 200, body }
    }

    fn error(err: &ServerError) -> Self {
        Self {
            status: err.status_code(),
            body: Bytes::from(err.to_string()),
        }
    }
}

/// The storage server.
///
/// In a real deployment an HTTP framework routes `GET`/`PUT /room/{id}` to
/// [`handle_get`](Self::handle_get) and [`handle_put`](Self::handle_put).
pub struct StorageServer {
    config: ServerConfig,
    store: Arc<RoomStore>,
}

impl StorageServer {
    /// Creates a new storage server.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(RoomStore::new(config.max_rooms));
        Self { config, store }
    }

    /// Creates a storage server over an existing store.
    pub fn with_store(config: ServerConfig, store: Arc<RoomStore>) -> Self {
        Self { config, store }
    }

    /// Returns the room store.
    pub fn store(&self) -> &Arc<RoomStore> {
        &self.store
    }

    /// Handles `GET /room/{id}`.
    pub fn handle_get(&self, path: &str) -> Response {
        match self.get(path) {
            Ok(body) => Response::ok(body),
            Err(err) => {
                debug!(path, error = %err, "get failed");
                Response::error(&err)
            }
        }
    }

    /// Handles `PUT /room/{id}`.
    pub fn handle_put(&self, path: &str, body: &[u8]) -> Response {
        match self.put(path, body) {
            Ok(()) => Response::ok(Bytes::new()),
            Err(err) => {
                warn!(path, error = %err, "put rejected");
                Response::error(&err)
            }
        }
    }

    fn get(&self, path: &str) -> ServerResult<Bytes> {
        let room_id = parse_room_path(path)?;
        self.store.get(room_id)
    }

    fn put(&self, path: &str, body: &[u8]) -> ServerResult<()> {
        let room_id = parse_room_path(path)?;
        if body.len() > self.config.max_payload_bytes {
            return Err(ServerError::PayloadTooLarge {
                size: body.len(),
                max: self.config.max_payload_bytes,
            });
        }
        let writes = self.store.put(room_id, Bytes::copy_from_slice(body))?;
        debug!(room = room_id, bytes = body.len(), writes, "room written");
        Ok(())
    }
}

/// Extracts the room id from a `/room/{id}` path.
fn parse_room_path(path: &str) -> ServerResult<&str> {
    let room_id = path
        .strip_prefix(ROOM_PREFIX)
        .ok_or_else(|| ServerError::InvalidPath(path.to_string()))?;
    if room_id.is_empty()
        || !room_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ServerError::InvalidRoomId(room_id.to_string()));
    }
    Ok(room_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_room_is_404() {
        let server = StorageServer::new(ServerConfig::default());
        assert_eq!(server.handle_get("/room/abc").status, 404);
    }

    #[test]
    fn put_then_get() {
        let server = StorageServer::new(ServerConfig::default());
        assert_eq!(server.handle_put("/room/abc", b"envelope").status, 200);

        let response = server.handle_get("/room/abc");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from_static(b"envelope"));
    }

    #[test]
    fn repeated_put_is_idempotent() {
        let server = StorageServer::new(ServerConfig::default());
        server.handle_put("/room/abc", b"same");
        server.handle_put("/room/abc", b"same");

        assert_eq!(server.handle_get("/room/abc").body, Bytes::from_static(b"same"));
        assert_eq!(server.store().len(), 1);
    }

    #[test]
    fn rejects_bad_paths() {
        let server = StorageServer::new(ServerConfig::default());
        assert_eq!(server.handle_get("/rooms/abc").status, 400);
        assert_eq!(server.handle_get("/room/").status, 400);
        assert_eq!(server.handle_put("/room/a/b", b"x").status, 400);
    }

    #[test]
    fn rejects_oversized_payload() {
        let server = StorageServer::new(ServerConfig::new().with_max_payload_bytes(4));
        let response = server.handle_put("/room/abc", b"too large");
        assert_eq!(response.status, 413);
        assert_eq!(server.handle_get("/room/abc").status, 404);
    }

    #[test]
    fn shared_store() {
        let store = Arc::new(RoomStore::new(10));
        let server = StorageServer::with_store(ServerConfig::default(), Arc::clone(&store));

        server.handle_put("/room/abc", b"x");
        assert_eq!(store.len(), 1);
    }
}
