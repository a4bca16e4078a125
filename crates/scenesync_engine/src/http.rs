//! HTTP transport abstraction.
//!
//! The actual HTTP client is abstracted via a trait to allow different
//! implementations (reqwest, hyper, a browser `fetch` bridge, ...). Both
//! operations must be safe to retry: `GET` is read-only and `PUT` replaces
//! the room resource as a whole.

use bytes::Bytes;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

/// Status and body of a storage response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` response with a body.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, body)
    }

    /// A `404 Not Found` response.
    pub fn not_found() -> Self {
        Self::new(404, Bytes::new())
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true for `404`.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// HTTP client abstraction.
///
/// `Err` is reserved for transport failures (no response at all); any
/// response, whatever its status, is returned as `Ok`.
pub trait HttpClient: Send + Sync {
    /// Sends a GET request.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, String>> + Send;

    /// Sends a PUT request with the given body.
    fn put(
        &self,
        url: &str,
        body: Bytes,
    ) -> impl Future<Output = Result<HttpResponse, String>> + Send;
}

/// Trait for servers that can handle loopback requests.
pub trait LoopbackServer {
    /// Handles a GET of a room path (e.g., `/room/abc`).
    fn handle_get(&self, path: &str) -> HttpResponse;

    /// Handles a PUT of a room path.
    fn handle_put(&self, path: &str, body: &[u8]) -> HttpResponse;
}

/// A loopback HTTP client that routes requests directly to an in-process
/// storage server.
///
/// Useful for testing without actual network overhead. The client can be
/// taken offline to simulate an unreachable backend.
pub struct LoopbackClient<S: LoopbackServer> {
    server: S,
    online: AtomicBool,
}

impl<S: LoopbackServer + Send + Sync> LoopbackClient<S> {
    /// Creates a new loopback client connected to the given server.
    pub fn new(server: S) -> Self {
        Self {
            server,
            online: AtomicBool::new(true),
        }
    }

    /// Returns the server behind the client.
    pub fn server(&self) -> &S {
        &self.server
    }

    /// Simulates the network going down or coming back.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn route<'u>(&self, url: &'u str) -> Result<&'u str, String> {
        if !self.online.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        // Extract path from URL
        Ok(url.find("/room/").map(|i| &url[i..]).unwrap_or(url))
    }
}

impl<S: LoopbackServer + Send + Sync> HttpClient for LoopbackClient<S> {
    async fn get(&self, url: &str) -> Result<HttpResponse, String> {
        let path = self.route(url)?;
        Ok(self.server.handle_get(path))
    }

    async fn put(&self, url: &str, body: Bytes) -> Result<HttpResponse, String> {
        let path = self.route(url)?;
        Ok(self.server.handle_put(path, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapServer {
        rooms: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl LoopbackServer for MapServer {
        fn handle_get(&self, path: &str) -> HttpResponse {
            match self.rooms.lock().get(path) {
                Some(body) => HttpResponse::ok(body.clone()),
                None => HttpResponse::not_found(),
            }
        }

        fn handle_put(&self, path: &str, body: &[u8]) -> HttpResponse {
            self.rooms.lock().insert(path.to_string(), body.to_vec());
            HttpResponse::ok(Bytes::new())
        }
    }

    #[test]
    fn response_classification() {
        assert!(HttpResponse::ok(Bytes::new()).is_success());
        assert!(HttpResponse::new(204, Bytes::new()).is_success());
        assert!(!HttpResponse::not_found().is_success());
        assert!(HttpResponse::not_found().is_not_found());
        assert!(!HttpResponse::new(500, Bytes::new()).is_success());
    }

    #[tokio::test]
    async fn loopback_routes_by_room_path() {
        let client = LoopbackClient::new(MapServer::default());

        let missing = client.get("http://backend.local/room/abc").await.unwrap();
        assert!(missing.is_not_found());

        let put = client
            .put("http://backend.local/room/abc", Bytes::from_static(b"data"))
            .await
            .unwrap();
        assert!(put.is_success());

        let found = client.get("https://elsewhere/room/abc").await.unwrap();
        assert_eq!(found.body, Bytes::from_static(b"data"));
        assert!(client.server().rooms.lock().contains_key("/room/abc"));
    }

    #[tokio::test]
    async fn offline_client_fails_requests() {
        let client = LoopbackClient::new(MapServer::default());
        client.set_online(false);

        assert!(client.get("http://backend.local/room/abc").await.is_err());
        assert!(client
            .put("http://backend.local/room/abc", Bytes::new())
            .await
            .is_err());

        client.set_online(true);
        assert!(client.get("http://backend.local/room/abc").await.is_ok());
    }
}
