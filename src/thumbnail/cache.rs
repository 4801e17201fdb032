// SPDX-License-Identifier: MPL-2.0
//! Process-scoped store of resolved thumbnail URIs.
//!
//! Source videos are immutable once posted, so a resolved preview URI stays
//! valid for the whole session: entries are created on first successful
//! resolution and never invalidated or re-resolved. The store is an explicit
//! injected value rather than ambient global state, so tests can reset it or
//! swap a fresh one per case.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Shared, insert-only map from video URI to resolved preview URI.
///
/// Cloning yields another handle to the same underlying map. Writes happen
/// from the single UI event loop; the mutex only makes the handle trivially
/// shareable with resolution futures.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl ThumbnailStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the resolved preview URI for a video URI.
    #[must_use]
    pub fn get(&self, uri: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(uri).cloned())
    }

    /// Records a resolved preview URI for a video URI.
    ///
    /// Entries are read-only after creation: a second insert for the same
    /// URI is ignored and the first resolution wins.
    pub fn insert(&self, uri: impl Into<String>, resolved: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.entry(uri.into()).or_insert_with(|| resolved.into());
        }
    }

    /// Returns the number of resolved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Checks if the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Intended for tests and session teardown.
    pub fn reset(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = ThumbnailStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("v.mp4"), None);
    }

    #[test]
    fn insert_then_get_returns_resolved_uri() {
        let store = ThumbnailStore::new();
        store.insert("v.mp4", "v_still.jpg");
        assert_eq!(store.get("v.mp4"), Some("v_still.jpg".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn first_resolution_wins() {
        let store = ThumbnailStore::new();
        store.insert("v.mp4", "first.jpg");
        store.insert("v.mp4", "second.jpg");
        assert_eq!(store.get("v.mp4"), Some("first.jpg".to_string()));
    }

    #[test]
    fn clones_share_the_same_entries() {
        let store = ThumbnailStore::new();
        let handle = store.clone();
        handle.insert("v.mp4", "still.jpg");
        assert_eq!(store.get("v.mp4"), Some("still.jpg".to_string()));
    }

    #[test]
    fn reset_clears_all_entries() {
        let store = ThumbnailStore::new();
        store.insert("a.mp4", "a.jpg");
        store.insert("b.mp4", "b.jpg");
        store.reset();
        assert!(store.is_empty());
    }
}
