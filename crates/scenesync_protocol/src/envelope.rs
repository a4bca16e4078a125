//! Envelope framing.

use crate::error::{ProtocolError, ProtocolResult};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use scenesync_core::{EncryptedPayload, IV_LENGTH};

/// Size of the scene version field.
pub const VERSION_LENGTH: usize = 4;
/// Size of the fixed envelope header (scene version + IV).
pub const HEADER_LENGTH: usize = VERSION_LENGTH + IV_LENGTH;

/// Converts a scene version to its header representation.
///
/// Versions beyond `u32::MAX` saturate; the header is informational and
/// staleness decisions are made on the decrypted collection.
pub fn header_version(scene_version: u64) -> u32 {
    u32::try_from(scene_version).unwrap_or(u32::MAX)
}

/// An encrypted scene as persisted by the storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Scene version of the sealed collection.
    pub scene_version: u32,
    /// IV the ciphertext was produced with.
    pub iv: [u8; IV_LENGTH],
    /// Ciphertext including the authentication tag.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Creates an envelope.
    pub fn new(scene_version: u32, iv: [u8; IV_LENGTH], ciphertext: Vec<u8>) -> Self {
        Self {
            scene_version,
            iv,
            ciphertext,
        }
    }

    /// Wraps an encryption result for a collection with the given scene version.
    pub fn from_payload(scene_version: u64, payload: EncryptedPayload) -> Self {
        Self::new(
            header_version(scene_version),
            payload.iv,
            payload.ciphertext,
        )
    }

    /// Returns the number of bytes [`encode`](Self::encode) produces.
    pub fn encoded_len(&self) -> usize {
        HEADER_LENGTH + self.ciphertext.len()
    }

    /// Encodes the envelope to its wire form.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        buf.put_u32(self.scene_version);
        buf.put_slice(&self.iv);
        buf.put_slice(&self.ciphertext);
        buf.freeze()
    }

    /// Parses an envelope from its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Malformed`] if the input is shorter than the
    /// fixed header.
    pub fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(ProtocolError::malformed(format!(
                "envelope is {} bytes, header needs {}",
                bytes.len(),
                HEADER_LENGTH
            )));
        }

        let mut buf = bytes;
        let scene_version = buf.get_u32();
        let mut iv = [0u8; IV_LENGTH];
        buf.copy_to_slice(&mut iv);

        Ok(Self {
            scene_version,
            iv,
            ciphertext: buf.to_vec(),
        })
    }

    /// Reads only the scene version header.
    pub fn peek_scene_version(bytes: &[u8]) -> ProtocolResult<u32> {
        if bytes.len() < HEADER_LENGTH {
            return Err(ProtocolError::malformed(format!(
                "envelope is {} bytes, header needs {}",
                bytes.len(),
                HEADER_LENGTH
            )));
        }
        let mut buf = bytes;
        Ok(buf.get_u32())
    }

    /// Returns the encryption half of the envelope.
    pub fn payload(&self) -> EncryptedPayload {
        EncryptedPayload {
            iv: self.iv,
            ciphertext: self.ciphertext.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_big_endian() {
        let envelope = Envelope::new(0x0102_0304, [0xAA; IV_LENGTH], vec![1, 2, 3]);
        let bytes = envelope.encode();

        assert_eq!(bytes.len(), 19);
        assert_eq!(&bytes[..4], &[1, 2, 3, 4]);
        assert_eq!(&bytes[4..16], &[0xAA; 12]);
        assert_eq!(&bytes[16..], &[1, 2, 3]);
    }

    #[test]
    fn decode_roundtrip() {
        let envelope = Envelope::new(42, [7; IV_LENGTH], vec![9; 100]);
        let decoded = Envelope::decode(&envelope.encode()).unwrap();
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn header_only_envelope_has_empty_ciphertext() {
        let decoded = Envelope::decode(&[0u8; HEADER_LENGTH]).unwrap();
        assert_eq!(decoded.scene_version, 0);
        assert!(decoded.ciphertext.is_empty());
    }

    #[test]
    fn short_input_is_malformed() {
        for len in [0, 4, 10, HEADER_LENGTH - 1] {
            let result = Envelope::decode(&vec![0u8; len]);
            assert!(matches!(result, Err(ProtocolError::Malformed { .. })));
        }
    }

    #[test]
    fn peek_reads_header() {
        let bytes = Envelope::new(77, [0; IV_LENGTH], vec![]).encode();
        assert_eq!(Envelope::peek_scene_version(&bytes).unwrap(), 77);
        assert!(Envelope::peek_scene_version(&bytes[..3]).is_err());
    }

    #[test]
    fn header_version_saturates() {
        assert_eq!(header_version(12), 12);
        assert_eq!(header_version(u64::from(u32::MAX)), u32::MAX);
        assert_eq!(header_version(u64::MAX), u32::MAX);
    }
}
