//! # SceneSync Protocol
//!
//! Wire formats exchanged with the room storage backend.
//!
//! This crate provides:
//! - [`Envelope`]: scene version header + IV + ciphertext framing
//! - Scene payload codec (JSON element arrays)
//! - [`seal`] / [`open`] composing payload, encryption and framing
//!
//! This is a pure protocol crate with no I/O operations.
//!
//! ## Envelope layout
//!
//! | offset | length | field |
//! |---|---|---|
//! | 0 | 4 | scene version (big-endian `u32`) |
//! | 4 | 12 | IV |
//! | 16 | remainder | ciphertext |

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod envelope;
mod error;
mod payload;

pub use envelope::{header_version, Envelope, HEADER_LENGTH, VERSION_LENGTH};
pub use error::{ProtocolError, ProtocolResult};
pub use payload::{decode_elements, encode_elements, open, seal};
