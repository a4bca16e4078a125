//! Scene fixtures shared by unit and integration tests.

use scenesync_core::{Element, EncryptionKey, RoomCipher, RoomCredentials};
use scenesync_protocol::seal;

/// Room id used by fixtures.
pub const TEST_ROOM_ID: &str = "test-room-id";

/// A deterministic 128-bit room key.
pub fn fixed_key() -> EncryptionKey {
    EncryptionKey::from_bytes(&[0x42; 16]).expect("16 byte key is valid")
}

/// Credentials for [`TEST_ROOM_ID`] under [`fixed_key`].
pub fn test_credentials() -> RoomCredentials {
    RoomCredentials::new(TEST_ROOM_ID, fixed_key())
}

/// A small scene: two live shapes and one tombstone.
pub fn sample_scene() -> Vec<Element> {
    vec![
        Element::new("rect-1")
            .with_version(3)
            .with_nonce(1_111)
            .with_updated(1_000)
            .with_property("type", "rectangle")
            .with_property("x", 10.0)
            .with_property("y", 20.0),
        Element::new("ellipse-1")
            .with_version(1)
            .with_nonce(2_222)
            .with_updated(1_100)
            .with_property("type", "ellipse"),
        Element::new("arrow-1")
            .with_version(5)
            .with_nonce(3_333)
            .with_updated(1_200)
            .with_property("type", "arrow")
            .deleted(),
    ]
}

/// A single-element scene whose scene version equals `version`.
pub fn scene_at_version(id: &str, version: u64) -> Vec<Element> {
    vec![Element::new(id)
        .with_version(version)
        .with_nonce(7)
        .with_property("type", "rectangle")]
}

/// Seals `elements` under `key` and returns the wire bytes.
pub fn sealed_scene(elements: &[Element], key: &EncryptionKey) -> Vec<u8> {
    let cipher = RoomCipher::new(key).expect("fixture key is valid");
    seal(elements, &cipher)
        .expect("fixture scene seals")
        .encode()
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenesync_core::scene_version;

    #[test]
    fn sample_scene_version() {
        assert_eq!(scene_version(&sample_scene()), 9);
    }

    #[test]
    fn scene_at_version_matches() {
        assert_eq!(scene_version(&scene_at_version("x", 41)), 41);
    }

    #[test]
    fn sealed_scene_has_header() {
        let bytes = sealed_scene(&sample_scene(), &fixed_key());
        assert_eq!(&bytes[..4], &9u32.to_be_bytes());
    }
}
