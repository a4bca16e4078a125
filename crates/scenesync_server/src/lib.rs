//! # SceneSync Server
//!
//! Reference room storage backend for SceneSync.
//!
//! This crate provides:
//! - The `GET /room/{id}` and `PUT /room/{id}` resource handlers
//! - An in-memory room store
//! - Request size limits
//!
//! # Architecture
//!
//! The server treats envelopes as opaque bytes: it never sees room keys and
//! cannot read scenes. Each `PUT` replaces the stored envelope, so
//! concurrent writers resolve last-writer-wins and repeated writes of the
//! same body are idempotent.
//!
//! ```
//! use scenesync_server::{ServerConfig, StorageServer};
//!
//! let server = StorageServer::new(ServerConfig::default());
//! assert_eq!(server.handle_get("/room/abc").status, 404);
//!
//! server.handle_put("/room/abc", &[0u8; 32]);
//! assert_eq!(server.handle_get("/room/abc").status, 200);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod server;
mod store;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{Response, StorageServer};
pub use store::{RoomStore, StoredRoom};
