//! Collaboration session state handed to the sync core by the editor.

use crate::crypto::EncryptionKey;
use crate::error::CoreResult;

/// Identifies a shared room and the key its scene is encrypted with.
#[derive(Debug, Clone)]
pub struct RoomCredentials {
    /// Room identifier (path segment of the storage resource).
    pub room_id: String,
    /// Symmetric room key.
    pub room_key: EncryptionKey,
}

impl RoomCredentials {
    /// Creates credentials from an id and a key.
    pub fn new(room_id: impl Into<String>, room_key: EncryptionKey) -> Self {
        Self {
            room_id: room_id.into(),
            room_key,
        }
    }

    /// Parses credentials from a room id and the base64url key text of a
    /// collaboration link.
    pub fn from_link_parts(room_id: impl Into<String>, room_key: &str) -> CoreResult<Self> {
        Ok(Self::new(room_id, EncryptionKey::from_base64url(room_key)?))
    }
}

/// The slice of editor state the sync core reads.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Active collaboration room, if the editor is in a session.
    pub collaboration: Option<RoomCredentials>,
}

impl AppState {
    /// Creates state for an active collaboration session.
    pub fn collaborating(credentials: RoomCredentials) -> Self {
        Self {
            collaboration: Some(credentials),
        }
    }

    /// Returns the active room credentials.
    pub fn room(&self) -> Option<&RoomCredentials> {
        self.collaboration.as_ref()
    }
}
