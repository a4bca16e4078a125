//! Scene elements and element restoration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A drawable unit of a scene.
///
/// Only the fields that take part in synchronization are typed. Every other
/// attribute (shape type, geometry, style, ...) is kept verbatim in
/// [`properties`](Self::properties) so that a round trip through the sync
/// core never drops data it does not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Stable identifier, unique within a scene.
    pub id: String,
    /// Incremented on every local mutation of the element.
    #[serde(default)]
    pub version: u64,
    /// Random tiebreaker for equal versions.
    #[serde(default)]
    pub version_nonce: u32,
    /// Tombstone flag. Deleted elements are kept so deletions propagate.
    #[serde(default)]
    pub is_deleted: bool,
    /// Last update time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated: u64,
    /// Remaining element attributes.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Element {
    /// Creates a live element at version 1.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: 1,
            version_nonce: 0,
            is_deleted: false,
            updated: 0,
            properties: Map::new(),
        }
    }

    /// Sets the version.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Sets the version nonce.
    pub fn with_nonce(mut self, version_nonce: u32) -> Self {
        self.version_nonce = version_nonce;
        self
    }

    /// Sets the update timestamp.
    pub fn with_updated(mut self, updated: u64) -> Self {
        self.updated = updated;
        self
    }

    /// Sets an opaque attribute.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Marks the element as deleted.
    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    /// Records a local mutation: bumps the version and refreshes the nonce and timestamp.
    pub fn bump(&mut self, version_nonce: u32, updated: u64) {
        self.version = self.version.saturating_add(1);
        self.version_nonce = version_nonce;
        self.updated = updated;
    }

    /// Soft-deletes the element as a local mutation.
    pub fn tombstone(&mut self, version_nonce: u32, updated: u64) {
        self.is_deleted = true;
        self.bump(version_nonce, updated);
    }

    /// Returns the element type attribute, if present.
    pub fn kind(&self) -> Option<&str> {
        self.properties.get("type").and_then(Value::as_str)
    }
}

/// Normalizes a collection decoded from the wire before it is trusted.
///
/// Elements without an id are dropped and only the first occurrence of a
/// repeated id is kept. Everything else passes through untouched.
pub fn restore_elements(elements: Vec<Element>) -> Vec<Element> {
    let total = elements.len();
    let mut seen = HashSet::with_capacity(total);
    let restored: Vec<Element> = elements
        .into_iter()
        .filter(|element| !element.id.is_empty() && seen.insert(element.id.clone()))
        .collect();

    if restored.len() != total {
        tracing::debug!(
            dropped = total - restored.len(),
            kept = restored.len(),
            "restore dropped invalid or duplicate elements"
        );
    }
    restored
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_wire_element() {
        let raw = json!({
            "id": "rect-1",
            "type": "rectangle",
            "version": 4,
            "versionNonce": 1234,
            "isDeleted": false,
            "updated": 1700000000000u64,
            "x": 10.5,
            "strokeColor": "#1e1e1e"
        });

        let element: Element = serde_json::from_value(raw).unwrap();
        assert_eq!(element.id, "rect-1");
        assert_eq!(element.version, 4);
        assert_eq!(element.version_nonce, 1234);
        assert_eq!(element.updated, 1_700_000_000_000);
        assert_eq!(element.kind(), Some("rectangle"));
        assert_eq!(element.properties.get("x"), Some(&json!(10.5)));
    }

    #[test]
    fn unknown_attributes_survive_serialization() {
        let element = Element::new("e1")
            .with_property("type", "ellipse")
            .with_property("angle", 0.5);

        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], json!("ellipse"));
        assert_eq!(value["versionNonce"], json!(0));
        assert_eq!(value["isDeleted"], json!(false));

        let back: Element = serde_json::from_value(value).unwrap();
        assert_eq!(back, element);
    }

    #[test]
    fn missing_sync_fields_default() {
        let element: Element = serde_json::from_value(json!({ "id": "bare" })).unwrap();
        assert_eq!(element.version, 0);
        assert!(!element.is_deleted);
        assert!(element.properties.is_empty());
    }

    #[test]
    fn bump_increments_version() {
        let mut element = Element::new("e1").with_version(3);
        element.bump(99, 5000);
        assert_eq!(element.version, 4);
        assert_eq!(element.version_nonce, 99);
        assert_eq!(element.updated, 5000);

        element.tombstone(7, 6000);
        assert!(element.is_deleted);
        assert_eq!(element.version, 5);
    }

    #[test]
    fn restore_drops_empty_and_duplicate_ids() {
        let elements = vec![
            Element::new("a").with_version(1),
            Element::new(""),
            Element::new("b"),
            Element::new("a").with_version(9),
        ];

        let restored = restore_elements(elements);
        let ids: Vec<_> = restored.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(restored[0].version, 1);
    }

    #[test]
    fn restore_keeps_tombstones() {
        let restored = restore_elements(vec![Element::new("gone").deleted()]);
        assert_eq!(restored.len(), 1);
        assert!(restored[0].is_deleted);
    }
}
