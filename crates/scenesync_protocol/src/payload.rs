//! Scene payload codec.
//!
//! The plaintext sealed into an envelope is the UTF-8 JSON array of the
//! scene's elements.

use crate::envelope::Envelope;
use crate::error::ProtocolResult;
use scenesync_core::{scene_version, Element, RoomCipher};

/// Serializes elements to the payload plaintext.
pub fn encode_elements(elements: &[Element]) -> ProtocolResult<Vec<u8>> {
    Ok(serde_json::to_vec(elements)?)
}

/// Parses the payload plaintext.
pub fn decode_elements(bytes: &[u8]) -> ProtocolResult<Vec<Element>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encrypts `elements` and frames them with their scene version.
pub fn seal(elements: &[Element], cipher: &RoomCipher) -> ProtocolResult<Envelope> {
    let plaintext = encode_elements(elements)?;
    let payload = cipher.encrypt(&plaintext)?;
    Ok(Envelope::from_payload(scene_version(elements), payload))
}

/// Decrypts and parses an envelope.
///
/// The result has not been restored; callers normalize it before use.
pub fn open(envelope: &Envelope, cipher: &RoomCipher) -> ProtocolResult<Vec<Element>> {
    let plaintext = cipher.decrypt(&envelope.ciphertext, &envelope.iv)?;
    decode_elements(&plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use scenesync_core::{CoreError, EncryptionKey, KeyStrength};

    fn scene() -> Vec<Element> {
        vec![
            Element::new("a").with_version(2).with_property("type", "line"),
            Element::new("b").with_version(3).deleted(),
        ]
    }

    #[test]
    fn payload_is_json_array() {
        let bytes = encode_elements(&scene()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["id"], "a");
        assert_eq!(value[1]["isDeleted"], true);
    }

    #[test]
    fn invalid_payload_is_rejected() {
        assert!(matches!(
            decode_elements(b"{\"not\":\"an array\"}"),
            Err(ProtocolError::Payload(_))
        ));
        assert!(decode_elements(b"\xff\xfe").is_err());
    }

    #[test]
    fn seal_embeds_scene_version() {
        let cipher = RoomCipher::new(&EncryptionKey::generate(KeyStrength::Aes128)).unwrap();
        let envelope = seal(&scene(), &cipher).unwrap();
        assert_eq!(envelope.scene_version, 5);
    }

    #[test]
    fn seal_then_open() {
        let cipher = RoomCipher::new(&EncryptionKey::generate(KeyStrength::Aes128)).unwrap();
        let bytes = seal(&scene(), &cipher).unwrap().encode();

        let envelope = Envelope::decode(&bytes).unwrap();
        assert_eq!(open(&envelope, &cipher).unwrap(), scene());
    }

    #[test]
    fn open_with_wrong_key_is_authentication_error() {
        let sealer = RoomCipher::new(&EncryptionKey::generate(KeyStrength::Aes128)).unwrap();
        let other = RoomCipher::new(&EncryptionKey::generate(KeyStrength::Aes128)).unwrap();
        let envelope = seal(&scene(), &sealer).unwrap();

        assert!(matches!(
            open(&envelope, &other),
            Err(ProtocolError::Crypto(CoreError::Authentication { .. }))
        ));
    }
}
