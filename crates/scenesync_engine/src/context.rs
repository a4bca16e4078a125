//! Per-call sync context.

use crate::error::{SyncError, SyncResult};
use scenesync_core::{AppState, Element, RoomCredentials};

/// Everything one sync call reads. Borrowed from the caller for the
/// duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct SyncContext<'a> {
    /// Room to sync with.
    pub credentials: &'a RoomCredentials,
    /// The caller's current element collection.
    pub elements: &'a [Element],
}

impl<'a> SyncContext<'a> {
    /// Creates a context from explicit credentials.
    pub fn new(credentials: &'a RoomCredentials, elements: &'a [Element]) -> Self {
        Self {
            credentials,
            elements,
        }
    }

    /// Creates a context from the editor's app state.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the editor is not in a collaboration
    /// session.
    pub fn from_app_state(app_state: &'a AppState, elements: &'a [Element]) -> SyncResult<Self> {
        let credentials = app_state
            .room()
            .ok_or_else(|| SyncError::configuration("no active collaboration room"))?;
        Ok(Self::new(credentials, elements))
    }

    /// Returns the room id.
    pub fn room_id(&self) -> &'a str {
        &self.credentials.room_id
    }
}

/// Checks that a room id is a non-empty URL path segment.
pub fn validate_room_id(room_id: &str) -> SyncResult<()> {
    if room_id.is_empty() {
        return Err(SyncError::configuration("room id is empty"));
    }
    if let Some(c) = room_id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(SyncError::configuration(format!(
            "room id contains invalid character {c:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenesync_core::{EncryptionKey, KeyStrength};

    #[test]
    fn context_from_app_state() {
        let credentials = RoomCredentials::new("room-1", EncryptionKey::generate(KeyStrength::Aes128));
        let state = AppState::collaborating(credentials);
        let elements = vec![Element::new("a")];

        let context = SyncContext::from_app_state(&state, &elements).unwrap();
        assert_eq!(context.room_id(), "room-1");
        assert_eq!(context.elements.len(), 1);
    }

    #[test]
    fn context_requires_room() {
        let state = AppState::default();
        let result = SyncContext::from_app_state(&state, &[]);
        assert!(matches!(result, Err(SyncError::Configuration(_))));
    }

    #[test]
    fn room_id_validation() {
        assert!(validate_room_id("a1b2c3d4e5").is_ok());
        assert!(validate_room_id("test-room_id").is_ok());
        assert!(validate_room_id("").is_err());
        assert!(validate_room_id("../etc").is_err());
        assert!(validate_room_id("room id").is_err());
    }
}
