//! In-memory room store.

use crate::error::{ServerError, ServerResult};
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Instant;

/// The envelope stored for one room.
#[derive(Debug, Clone)]
pub struct StoredRoom {
    /// Last written envelope.
    pub envelope: Bytes,
    /// Number of reads the room has served.
    pub reads: u64,
    /// Number of writes the room has received.
    pub writes: u64,
    /// Time of the last write.
    pub updated_at: Instant,
}

/// Last-writer-wins storage of one envelope per room.
#[derive(Debug)]
pub struct RoomStore {
    rooms: RwLock<HashMap<String, StoredRoom>>,
    max_rooms: usize,
}

impl RoomStore {
    /// Creates an empty store holding at most `max_rooms` rooms.
    pub fn new(max_rooms: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            max_rooms,
        }
    }

    /// Returns the envelope of a room.
    pub fn get(&self, room_id: &str) -> ServerResult<Bytes> {
        let mut rooms = self.rooms.write();
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| ServerError::RoomNotFound(room_id.to_string()))?;
        room.reads += 1;
        Ok(room.envelope.clone())
    }

    /// Replaces the envelope of a room, creating it if needed.
    ///
    /// Returns the number of writes the room has received.
    pub fn put(&self, room_id: &str, envelope: Bytes) -> ServerResult<u64> {
        let mut rooms = self.rooms.write();
        if !rooms.contains_key(room_id) && rooms.len() >= self.max_rooms {
            return Err(ServerError::CapacityExhausted(self.max_rooms));
        }

        let room = rooms
            .entry(room_id.to_string())
            .or_insert_with(|| StoredRoom {
                envelope: Bytes::new(),
                reads: 0,
                writes: 0,
                updated_at: Instant::now(),
            });
        room.envelope = envelope;
        room.writes += 1;
        room.updated_at = Instant::now();
        Ok(room.writes)
    }

    /// Returns a snapshot of a room.
    pub fn room(&self, room_id: &str) -> Option<StoredRoom> {
        self.rooms.read().get(room_id).cloned()
    }

    /// Returns the number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.read().len()
    }

    /// Returns true if no room has been written.
    pub fn is_empty(&self) -> bool {
        self.rooms.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get() {
        let store = RoomStore::new(10);
        assert!(store.is_empty());
        assert!(matches!(store.get("a"), Err(ServerError::RoomNotFound(_))));

        assert_eq!(store.put("a", Bytes::from_static(b"one")).unwrap(), 1);
        assert_eq!(store.get("a").unwrap(), Bytes::from_static(b"one"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn last_writer_wins() {
        let store = RoomStore::new(10);
        store.put("a", Bytes::from_static(b"first")).unwrap();
        store.put("a", Bytes::from_static(b"second")).unwrap();

        assert_eq!(store.get("a").unwrap(), Bytes::from_static(b"second"));
        assert_eq!(store.room("a").unwrap().writes, 2);
    }

    #[test]
    fn counts_reads_and_writes() {
        let store = RoomStore::new(10);
        assert!(store.get("a").is_err());

        store.put("a", Bytes::from_static(b"one")).unwrap();
        store.get("a").unwrap();
        store.get("a").unwrap();

        let room = store.room("a").unwrap();
        assert_eq!(room.reads, 2);
        assert_eq!(room.writes, 1);
    }

    #[test]
    fn capacity_applies_to_new_rooms_only() {
        let store = RoomStore::new(1);
        store.put("a", Bytes::new()).unwrap();
        assert_eq!(
            store.put("b", Bytes::new()),
            Err(ServerError::CapacityExhausted(1))
        );
        assert!(store.put("a", Bytes::from_static(b"again")).is_ok());
    }
}
