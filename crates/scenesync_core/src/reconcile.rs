//! Reconciliation of divergent element collections.
//!
//! Two collections are merged by element id. An id present on one side only
//! is adopted as is. For an id present on both sides the element with the
//! greater `version` wins; equal versions fall back to the greater
//! `version_nonce`, then the later `updated`, then the greater canonical
//! JSON encoding. The rule only looks at the two candidates and is a total
//! order on distinct elements, so the surviving elements do not depend on
//! which side is called local.

use crate::element::Element;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Counters describing what a reconciliation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Shared ids where the local element won.
    pub kept_local: usize,
    /// Shared ids where the remote element replaced the local one.
    pub replaced_by_remote: usize,
    /// Ids that only existed remotely.
    pub added_from_remote: usize,
}

impl ReconcileStats {
    /// Returns true if the result differs from the local collection.
    pub fn changed_local(&self) -> bool {
        self.replaced_by_remote > 0 || self.added_from_remote > 0
    }
}

/// Returns true if `remote` should replace `local` for the same id.
///
/// Only identical elements keep the local copy.
pub fn prefers_remote(local: &Element, remote: &Element) -> bool {
    let remote_key = (remote.version, remote.version_nonce, remote.updated);
    let local_key = (local.version, local.version_nonce, local.updated);
    match remote_key.cmp(&local_key) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => local != remote && canonical(remote) > canonical(local),
    }
}

/// Content fingerprint for elements that agree on every clock field.
fn canonical(element: &Element) -> Option<String> {
    serde_json::to_string(element).ok()
}

/// Merges a local and a remote collection.
///
/// Every surviving id appears exactly once. Local elements keep their
/// painter's order (with the winning version substituted in place) and
/// remote-only elements follow in remote order.
pub fn reconcile(local: &[Element], remote: &[Element]) -> Vec<Element> {
    reconcile_with_stats(local, remote).0
}

/// Like [`reconcile`], also reporting what happened.
pub fn reconcile_with_stats(
    local: &[Element],
    remote: &[Element],
) -> (Vec<Element>, ReconcileStats) {
    let mut remote_by_id: HashMap<&str, &Element> = HashMap::with_capacity(remote.len());
    for element in remote {
        remote_by_id.entry(element.id.as_str()).or_insert(element);
    }

    let mut stats = ReconcileStats::default();
    let mut emitted: HashSet<&str> = HashSet::with_capacity(local.len() + remote.len());
    let mut merged = Vec::with_capacity(local.len() + remote.len());

    for local_element in local {
        if !emitted.insert(local_element.id.as_str()) {
            continue;
        }
        match remote_by_id.get(local_element.id.as_str()) {
            Some(remote_element) if prefers_remote(local_element, remote_element) => {
                stats.replaced_by_remote += 1;
                merged.push((*remote_element).clone());
            }
            Some(_) => {
                stats.kept_local += 1;
                merged.push(local_element.clone());
            }
            None => merged.push(local_element.clone()),
        }
    }

    for remote_element in remote {
        if emitted.insert(remote_element.id.as_str()) {
            stats.added_from_remote += 1;
            merged.push(remote_element.clone());
        }
    }

    (merged, stats)
}
