//! Room encryption using AES-GCM.
//!
//! ## Security Model
//!
//! - Authenticated encryption (AES-128-GCM or AES-256-GCM, chosen by key length)
//! - Fresh random 12-byte IV per encryption
//! - Keys are zeroized on drop and redacted from `Debug`
//! - Any integrity failure surfaces as [`CoreError::Authentication`]
//!
//! Room keys travel in collaboration links as unpadded base64url text.

use crate::error::{CoreError, CoreResult};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes128Gcm, Aes256Gcm, Nonce,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the initialization vector in bytes.
pub const IV_LENGTH: usize = 12;
/// Size of the GCM authentication tag in bytes.
pub const TAG_LENGTH: usize = 16;

/// Supported key strengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStrength {
    /// 128-bit key (AES-128-GCM).
    #[default]
    Aes128,
    /// 256-bit key (AES-256-GCM).
    Aes256,
}

impl KeyStrength {
    /// Key length in bytes.
    pub const fn key_len(self) -> usize {
        match self {
            KeyStrength::Aes128 => 16,
            KeyStrength::Aes256 => 32,
        }
    }

    /// Key length in bits.
    pub const fn bits(self) -> usize {
        self.key_len() * 8
    }

    fn from_len(len: usize) -> CoreResult<Self> {
        match len {
            16 => Ok(KeyStrength::Aes128),
            32 => Ok(KeyStrength::Aes256),
            other => Err(CoreError::invalid_key_size(other)),
        }
    }
}

/// Symmetric room key.
///
/// Has no `PartialEq`; compare [`as_bytes`](Self::as_bytes) where needed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: Vec<u8>,
}

impl EncryptionKey {
    /// Generates a new random key.
    #[must_use]
    pub fn generate(strength: KeyStrength) -> Self {
        let mut bytes = vec![0u8; strength.key_len()];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error unless the slice is exactly 16 or 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        KeyStrength::from_len(bytes.len())?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Parses the base64url text form used in collaboration links.
    ///
    /// Trailing `=` padding is tolerated.
    pub fn from_base64url(text: &str) -> CoreResult<Self> {
        let trimmed = text.trim().trim_end_matches('=');
        if trimmed.is_empty() {
            return Err(CoreError::invalid_key_encoding("room key is empty"));
        }
        let mut decoded = URL_SAFE_NO_PAD
            .decode(trimmed)
            .map_err(|e| CoreError::invalid_key_encoding(e.to_string()))?;
        let key = Self::from_bytes(&decoded);
        decoded.zeroize();
        key
    }

    /// Returns the base64url text form of the key.
    ///
    /// # Security
    ///
    /// The result is the secret itself; don't log it.
    #[must_use]
    pub fn to_base64url(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.bytes)
    }

    /// Returns the key strength.
    pub fn strength(&self) -> KeyStrength {
        if self.bytes.len() == KeyStrength::Aes256.key_len() {
            KeyStrength::Aes256
        } else {
            KeyStrength::Aes128
        }
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("strength", &self.strength())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Output of a single encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// Initialization vector used for this message.
    pub iv: [u8; IV_LENGTH],
    /// Ciphertext including the authentication tag.
    pub ciphertext: Vec<u8>,
}

enum Cipher {
    Aes128(Box<Aes128Gcm>),
    Aes256(Box<Aes256Gcm>),
}

/// Encrypts and decrypts scene payloads for one room key.
pub struct RoomCipher {
    cipher: Cipher,
}

impl RoomCipher {
    /// Creates a cipher for the given key.
    pub fn new(key: &EncryptionKey) -> CoreResult<Self> {
        let bytes = key.as_bytes();
        let cipher = match KeyStrength::from_len(bytes.len())? {
            KeyStrength::Aes128 => Cipher::Aes128(Box::new(
                Aes128Gcm::new_from_slice(bytes)
                    .map_err(|_| CoreError::invalid_key_size(bytes.len()))?,
            )),
            KeyStrength::Aes256 => Cipher::Aes256(Box::new(
                Aes256Gcm::new_from_slice(bytes)
                    .map_err(|_| CoreError::invalid_key_size(bytes.len()))?,
            )),
        };
        Ok(Self { cipher })
    }

    /// Encrypts `plaintext` under a fresh random IV.
    pub fn encrypt(&self, plaintext: &[u8]) -> CoreResult<EncryptedPayload> {
        let mut iv = [0u8; IV_LENGTH];
        rand::thread_rng().fill_bytes(&mut iv);
        let nonce = Nonce::from_slice(&iv);

        let ciphertext = match &self.cipher {
            Cipher::Aes128(cipher) => cipher.encrypt(nonce, plaintext),
            Cipher::Aes256(cipher) => cipher.encrypt(nonce, plaintext),
        }
        .map_err(|_| CoreError::encryption_failed("AES-GCM encryption error"))?;

        Ok(EncryptedPayload { iv, ciphertext })
    }

    /// Decrypts a ciphertext produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Authentication`] if the ciphertext, IV or key
    /// fails integrity verification.
    pub fn decrypt(&self, ciphertext: &[u8], iv: &[u8; IV_LENGTH]) -> CoreResult<Vec<u8>> {
        if ciphertext.len() < TAG_LENGTH {
            return Err(CoreError::authentication(format!(
                "ciphertext too short: {} bytes",
                ciphertext.len()
            )));
        }
        let nonce = Nonce::from_slice(iv);

        match &self.cipher {
            Cipher::Aes128(cipher) => cipher.decrypt(nonce, ciphertext),
            Cipher::Aes256(cipher) => cipher.decrypt(nonce, ciphertext),
        }
        .map_err(|_| CoreError::authentication("integrity check failed"))
    }

    /// Returns the strength of the underlying key.
    pub fn strength(&self) -> KeyStrength {
        match self.cipher {
            Cipher::Aes128(_) => KeyStrength::Aes128,
            Cipher::Aes256(_) => KeyStrength::Aes256,
        }
    }
}

impl std::fmt::Debug for RoomCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomCipher")
            .field("strength", &self.strength())
            .finish()
    }
}
