//! Property-based test generators using proptest.
//!
//! Element ids are drawn from a deliberately small alphabet so that two
//! independently generated collections share ids often enough to exercise
//! the conflict path of reconciliation.

use proptest::prelude::*;
use scenesync_core::{restore_elements, Element, EncryptionKey};

/// Strategy for element ids with frequent collisions.
pub fn element_id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-f][0-9]").expect("Invalid regex")
}

/// Strategy for a single element.
pub fn element_strategy() -> impl Strategy<Value = Element> {
    (
        element_id_strategy(),
        0u64..1_000,
        any::<u32>(),
        any::<bool>(),
        0u64..2_000_000_000_000,
        prop::sample::select(vec!["rectangle", "ellipse", "arrow", "text", "freedraw"]),
    )
        .prop_map(|(id, version, nonce, deleted, updated, kind)| {
            let mut element = Element::new(id)
                .with_version(version)
                .with_nonce(nonce)
                .with_updated(updated)
                .with_property("type", kind);
            element.is_deleted = deleted;
            element
        })
}

/// Strategy for a collection without duplicate ids.
pub fn collection_strategy(max_len: usize) -> impl Strategy<Value = Vec<Element>> {
    prop::collection::vec(element_strategy(), 0..=max_len).prop_map(restore_elements)
}

/// Strategy for a non-empty collection without duplicate ids.
pub fn non_empty_collection_strategy(max_len: usize) -> impl Strategy<Value = Vec<Element>> {
    prop::collection::vec(element_strategy(), 1..=max_len.max(1)).prop_map(restore_elements)
}

/// Strategy for room keys of both supported strengths.
pub fn key_strategy() -> impl Strategy<Value = EncryptionKey> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 16),
        prop::collection::vec(any::<u8>(), 32),
    ]
    .prop_map(|bytes| EncryptionKey::from_bytes(&bytes).expect("16 and 32 byte keys are valid"))
}

/// Strategy for arbitrary plaintext payloads.
pub fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2048)
}

/// Strategy for wire IVs.
pub fn iv_strategy() -> impl Strategy<Value = [u8; 12]> {
    prop::array::uniform12(any::<u8>())
}
