//! # SceneSync Engine
//!
//! Synchronizes a local scene with the copy kept by an HTTP storage backend.
//!
//! This crate provides:
//! - [`HttpStorage`]: the fetch → compare → merge → write orchestrator
//! - Storage configuration
//! - HTTP client abstraction and an in-process loopback client
//! - A per-room cache of the last written scene version
//!
//! ## Protocol
//!
//! Each [`HttpStorage::sync`] call:
//! 1. Fetches the room envelope (`GET /room/{id}`)
//! 2. Writes the local scene directly if the room was never saved
//! 3. Otherwise decrypts the remote scene and compares scene versions
//! 4. Writes the local scene if it is at least as new, or reconciles the two
//!    scenes and writes the merge if the remote one is newer
//!
//! The returned [`SyncOutcome`] borrows the caller's collection when nothing
//! was adopted from the remote scene and owns the merged collection when
//! something was, so callers can skip redundant state updates.
//!
//! ## Key Invariants
//!
//! - A remote scene that fails to decode or decrypt is never overwritten
//! - No retries happen inside the engine; failures are reported with
//!   [`SyncError::is_retryable`]
//! - Concurrent syncs on one room are not serialized: the storage backend is
//!   last-writer-wins

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod http;
mod storage;

pub use config::{StorageConfig, BACKEND_URL_ENV};
pub use context::{validate_room_id, SyncContext};
pub use error::{StorageOperation, SyncError, SyncResult};
pub use http::{HttpClient, HttpResponse, LoopbackClient, LoopbackServer};
pub use storage::{HttpStorage, SyncOutcome, SyncStats};
