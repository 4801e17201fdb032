// SPDX-License-Identifier: MPL-2.0
//! Integration tests for thumbnail resolution, the provider transform, and
//! the process-scoped store.

use iced_feed::error::{Error, MediaError};
use iced_feed::thumbnail::{
    resolve, still_frame_url, FrameExtractor, NullExtractor, Resolution, StillWidth,
    ThumbnailStore,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Extractor double that records how often it is asked to decode.
struct RecordingExtractor {
    calls: AtomicUsize,
}

impl RecordingExtractor {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FrameExtractor for RecordingExtractor {
    fn is_available(&self) -> bool {
        true
    }

    fn extract_still(
        &self,
        uri: &str,
        _at: Duration,
        _width: StillWidth,
    ) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if uri.contains("broken") {
            return Err(MediaError::DecodeFailed("no frames".to_string()).into());
        }
        Ok("/tmp/iced_feed_previews/test.jpg".to_string())
    }
}

#[test]
fn provider_transform_matches_documented_example() {
    // .../upload/abc/def.mp4 -> .../upload/so_0,f_jpg,q_auto,w_800/abc/def.jpg
    let url = still_frame_url(
        "https://media.example.com/upload/abc/def.mp4",
        StillWidth::default(),
    );
    assert_eq!(
        url.as_deref(),
        Some("https://media.example.com/upload/so_0,f_jpg,q_auto,w_800/abc/def.jpg")
    );
}

#[tokio::test]
async fn provider_uri_resolves_without_any_extraction() {
    let store = ThumbnailStore::new();
    let extractor = RecordingExtractor::new();

    let resolution = resolve(
        "https://media.example.com/upload/abc/def.mp4".to_string(),
        None,
        store.clone(),
        extractor.clone(),
        StillWidth::default(),
    )
    .await;

    assert_eq!(
        resolution.uri(),
        Some("https://media.example.com/upload/so_0,f_jpg,q_auto,w_800/abc/def.jpg")
    );
    assert_eq!(extractor.calls(), 0, "no on-device extraction may run");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn explicit_cover_bypasses_store_and_extraction() {
    let store = ThumbnailStore::new();
    let extractor = RecordingExtractor::new();

    let resolution = resolve(
        "https://media.example.com/upload/abc/def.mp4".to_string(),
        Some("https://cdn.example/picked_cover.jpg".to_string()),
        store.clone(),
        extractor.clone(),
        StillWidth::default(),
    )
    .await;

    assert_eq!(resolution.uri(), Some("https://cdn.example/picked_cover.jpg"));
    assert!(store.is_empty(), "the cover path must not touch the store");
    assert_eq!(extractor.calls(), 0);
}

#[tokio::test]
async fn second_resolution_is_served_from_the_store() {
    let store = ThumbnailStore::new();
    let extractor = RecordingExtractor::new();
    let uri = "https://cdn.example/raw/clip.mp4".to_string();

    let first = resolve(
        uri.clone(),
        None,
        store.clone(),
        extractor.clone(),
        StillWidth::default(),
    )
    .await;
    assert_eq!(extractor.calls(), 1);

    let second = resolve(
        uri,
        None,
        store.clone(),
        extractor.clone(),
        StillWidth::default(),
    )
    .await;

    assert_eq!(first, second);
    assert_eq!(extractor.calls(), 1, "the store must satisfy the second call");
}

#[tokio::test]
async fn extraction_failure_degrades_to_placeholder() {
    let store = ThumbnailStore::new();
    let extractor = RecordingExtractor::new();

    let resolution = resolve(
        "https://cdn.example/raw/broken.mp4".to_string(),
        None,
        store.clone(),
        extractor.clone(),
        StillWidth::default(),
    )
    .await;

    assert_eq!(resolution, Resolution::Unavailable);
    assert_eq!(extractor.calls(), 1);
    assert!(store.is_empty(), "failures must not be cached");
}

#[tokio::test]
async fn web_style_target_skips_extraction_entirely() {
    let store = ThumbnailStore::new();

    let resolution = resolve(
        "https://cdn.example/raw/clip.mp4".to_string(),
        None,
        store.clone(),
        Arc::new(NullExtractor),
        StillWidth::default(),
    )
    .await;

    assert_eq!(resolution, Resolution::Unavailable);
}

#[test]
fn store_entries_are_read_only_after_creation() {
    let store = ThumbnailStore::new();
    store.insert("v.mp4", "first.jpg");
    store.insert("v.mp4", "second.jpg");

    assert_eq!(store.get("v.mp4"), Some("first.jpg".to_string()));

    store.reset();
    assert!(store.is_empty());
}
