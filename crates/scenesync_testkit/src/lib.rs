//! # SceneSync Testkit
//!
//! Test utilities for SceneSync.
//!
//! This crate provides:
//! - Scene fixtures (sample elements, fixed room keys, sealed envelopes)
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scenesync_testkit::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn merge_is_commutative(a in collection_strategy(8), b in collection_strategy(8)) {
//!         // ...
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
