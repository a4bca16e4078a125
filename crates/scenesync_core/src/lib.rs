//! # SceneSync Core
//!
//! Core data model and pure algorithms for SceneSync.
//!
//! This crate provides:
//! - [`Element`] and element restoration
//! - The scene version logical clock
//! - Deterministic reconciliation of two element collections
//! - Room encryption (AES-GCM with per-message IVs)
//! - Room credentials and app state carried by the editor
//!
//! Nothing here performs I/O; transport and orchestration live in
//! `scenesync_engine`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod crypto;
mod element;
mod error;
mod reconcile;
mod session;
mod version;

pub use crypto::{EncryptedPayload, EncryptionKey, KeyStrength, RoomCipher, IV_LENGTH, TAG_LENGTH};
pub use element::{restore_elements, Element};
pub use error::{CoreError, CoreResult};
pub use reconcile::{prefers_remote, reconcile, reconcile_with_stats, ReconcileStats};
pub use session::{AppState, RoomCredentials};
pub use version::scene_version;

/// SceneSync version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
