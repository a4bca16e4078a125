//! The HTTP storage sync orchestrator.

use crate::config::StorageConfig;
use crate::context::{validate_room_id, SyncContext};
use crate::error::{SyncError, SyncResult};
use crate::http::{HttpClient, HttpResponse};
use bytes::Bytes;
use parking_lot::RwLock;
use scenesync_core::{
    reconcile_with_stats, restore_elements, scene_version, Element, ReconcileStats, RoomCipher,
    RoomCredentials,
};
use scenesync_protocol::{header_version, open, seal, Envelope};
use std::borrow::Cow;
use std::collections::HashMap;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of a successful sync call.
#[derive(Debug, Clone)]
pub struct SyncOutcome<'a> {
    /// The collection that was written.
    ///
    /// `Cow::Borrowed` is the caller's own collection, returned untouched
    /// because nothing newer existed remotely. `Cow::Owned` is a merge that
    /// contains remote edits the caller has not seen yet.
    pub elements: Cow<'a, [Element]>,
    /// Scene version of the written collection.
    pub scene_version: u64,
    /// Scene version of the remote collection, if the room existed.
    pub remote_version: Option<u64>,
    /// What reconciliation did, if the remote scene was newer.
    pub reconcile: Option<ReconcileStats>,
}

impl<'a> SyncOutcome<'a> {
    /// Returns true if the caller should adopt [`elements`](Self::elements).
    pub fn is_merged(&self) -> bool {
        matches!(self.elements, Cow::Owned(_))
    }

    /// Returns the written collection as an owned vector.
    pub fn into_elements(self) -> Vec<Element> {
        self.elements.into_owned()
    }
}

/// Counters over the lifetime of an [`HttpStorage`].
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Sync calls made.
    pub syncs: u64,
    /// Sync calls that reconciled with a newer remote scene.
    pub merges: u64,
    /// Successful writes.
    pub writes: u64,
    /// Sync calls that returned an error.
    pub failures: u64,
    /// Last error message.
    pub last_error: Option<String>,
    /// Time of the last successful write.
    pub last_write: Option<Instant>,
}

/// Synchronizes scenes with an HTTP storage backend.
///
/// One instance may serve many rooms and many concurrent calls; calls are
/// not serialized against each other.
pub struct HttpStorage<C: HttpClient> {
    config: StorageConfig,
    client: C,
    saved_versions: RwLock<HashMap<String, u64>>,
    stats: RwLock<SyncStats>,
}

impl<C: HttpClient> HttpStorage<C> {
    /// Creates a storage handle.
    pub fn new(config: StorageConfig, client: C) -> Self {
        Self {
            config,
            client,
            saved_versions: RwLock::new(HashMap::new()),
            stats: RwLock::new(SyncStats::default()),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the HTTP client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Gets the current stats.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Returns true if this collection's scene version is the last one
    /// written to the room by this storage handle.
    ///
    /// Autosave triggers use this to skip redundant syncs; [`sync`](Self::sync)
    /// itself never consults it.
    pub fn is_saved(&self, room_id: &str, elements: &[Element]) -> bool {
        self.saved_versions.read().get(room_id).copied() == Some(scene_version(elements))
    }

    /// Returns the last scene version written to a room.
    pub fn saved_version(&self, room_id: &str) -> Option<u64> {
        self.saved_versions.read().get(room_id).copied()
    }

    /// Saves the caller's scene, merging with a newer remote scene if there
    /// is one.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Configuration`] before any request if the backend URL,
    ///   room id or room key is invalid
    /// - [`SyncError::StorageUnavailable`] if the fetch or the write fails;
    ///   a failed write carries the collection it tried to store
    /// - [`SyncError::MalformedPayload`] / [`SyncError::Authentication`] if
    ///   the remote scene cannot be read; nothing is written in that case
    pub async fn sync<'a>(&self, context: &SyncContext<'a>) -> SyncResult<SyncOutcome<'a>> {
        let result = self.run_sync(context).await;

        let mut stats = self.stats.write();
        stats.syncs += 1;
        match &result {
            Ok(outcome) => {
                if outcome.is_merged() {
                    stats.merges += 1;
                }
            }
            Err(e) => {
                stats.failures += 1;
                stats.last_error = Some(e.to_string());
            }
        }
        drop(stats);

        result
    }

    /// Loads and decrypts the scene stored for a room.
    ///
    /// Returns `None` if the room has never been saved.
    pub async fn load(&self, credentials: &RoomCredentials) -> SyncResult<Option<Vec<Element>>> {
        self.config.validate()?;
        validate_room_id(&credentials.room_id)?;
        let cipher = RoomCipher::new(&credentials.room_key)?;

        let response = self.fetch(&self.config.room_url(&credentials.room_id)).await?;
        if response.is_not_found() {
            debug!(room = %credentials.room_id, "room not found");
            return Ok(None);
        }

        let envelope = Envelope::decode(&response.body)?;
        let elements = restore_elements(open(&envelope, &cipher)?);
        debug!(
            room = %credentials.room_id,
            elements = elements.len(),
            scene_version = scene_version(&elements),
            "loaded room scene"
        );
        Ok(Some(elements))
    }

    async fn run_sync<'a>(&self, context: &SyncContext<'a>) -> SyncResult<SyncOutcome<'a>> {
        self.config.validate()?;
        let room_id = context.room_id();
        validate_room_id(room_id)?;
        let cipher = RoomCipher::new(&context.credentials.room_key)?;

        let url = self.config.room_url(room_id);
        let local = context.elements;
        let local_version = scene_version(local);

        let response = self.fetch(&url).await?;
        if response.is_not_found() {
            debug!(room = %room_id, local_version, "room not saved yet, writing local scene");
            self.write(&url, room_id, &cipher, local).await?;
            return Ok(SyncOutcome {
                elements: Cow::Borrowed(local),
                scene_version: local_version,
                remote_version: None,
                reconcile: None,
            });
        }

        let envelope = Envelope::decode(&response.body)?;
        let remote = restore_elements(open(&envelope, &cipher)?);
        let remote_version = scene_version(&remote);
        if envelope.scene_version != header_version(remote_version) {
            warn!(
                room = %room_id,
                header = envelope.scene_version,
                remote_version,
                "envelope header disagrees with its scene"
            );
        }

        if remote_version <= local_version {
            debug!(room = %room_id, local_version, remote_version, "local scene is current");
            self.write(&url, room_id, &cipher, local).await?;
            return Ok(SyncOutcome {
                elements: Cow::Borrowed(local),
                scene_version: local_version,
                remote_version: Some(remote_version),
                reconcile: None,
            });
        }

        let (merged, stats) = reconcile_with_stats(local, &remote);
        let merged_version = scene_version(&merged);
        info!(
            room = %room_id,
            local_version,
            remote_version,
            merged_version,
            replaced = stats.replaced_by_remote,
            added = stats.added_from_remote,
            "remote scene is newer, merged"
        );
        self.write(&url, room_id, &cipher, &merged).await?;

        Ok(SyncOutcome {
            elements: Cow::Owned(merged),
            scene_version: merged_version,
            remote_version: Some(remote_version),
            reconcile: Some(stats),
        })
    }

    async fn fetch(&self, url: &str) -> SyncResult<HttpResponse> {
        let response = self
            .with_timeout(self.client.get(url))
            .await
            .map_err(SyncError::fetch_unavailable)?;

        if response.is_success() || response.is_not_found() {
            Ok(response)
        } else {
            Err(SyncError::fetch_unavailable(format!(
                "unexpected status {}",
                response.status
            )))
        }
    }

    async fn write(
        &self,
        url: &str,
        room_id: &str,
        cipher: &RoomCipher,
        elements: &[Element],
    ) -> SyncResult<()> {
        let envelope = seal(elements, cipher)?;
        let body: Bytes = envelope.encode();
        let version = scene_version(elements);

        let response = match self.with_timeout(self.client.put(url, body)).await {
            Ok(response) => response,
            Err(message) => {
                warn!(room = %room_id, error = %message, "scene write failed");
                return Err(SyncError::write_unavailable(message, elements.to_vec()));
            }
        };
        if !response.is_success() {
            warn!(room = %room_id, status = response.status, "scene write rejected");
            return Err(SyncError::write_unavailable(
                format!("unexpected status {}", response.status),
                elements.to_vec(),
            ));
        }

        self.saved_versions
            .write()
            .insert(room_id.to_string(), version);
        {
            let mut stats = self.stats.write();
            stats.writes += 1;
            stats.last_write = Some(Instant::now());
        }
        debug!(room = %room_id, scene_version = version, "scene written");
        Ok(())
    }

    async fn with_timeout<F>(&self, request: F) -> Result<HttpResponse, String>
    where
        F: Future<Output = Result<HttpResponse, String>>,
    {
        match tokio::time::timeout(self.config.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(format!("timed out after {:?}", self.config.timeout)),
        }
    }
}
