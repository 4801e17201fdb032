// SPDX-License-Identifier: MPL-2.0
//! Multi-source thumbnail resolution for video slides.
//!
//! A video slide needs a still preview before (and instead of) decoding the
//! video itself. [`resolve`] walks a prioritized source chain and degrades to
//! [`Resolution::Unavailable`] — rendered as a neutral placeholder glyph —
//! instead of surfacing an error to the caller.

pub mod cache;
pub mod extract;
pub mod provider;

pub use cache::ThumbnailStore;
pub use extract::{FfmpegExtractor, FrameExtractor, NullExtractor};
pub use provider::{still_frame_url, StillWidth};

use crate::config::defaults::EXTRACT_AT_MS;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a thumbnail resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A preview URI was found; display it.
    Resolved { uri: String },
    /// Every source came up empty; display the placeholder glyph.
    Unavailable,
}

impl Resolution {
    /// Returns the resolved URI, if any.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        match self {
            Resolution::Resolved { uri } => Some(uri),
            Resolution::Unavailable => None,
        }
    }
}

/// Resolves a preview URI for a video, first match wins:
///
/// 1. the caller-supplied `cover_uri`, without touching the store;
/// 2. a previously resolved entry in the store;
/// 3. the provider-transform rewrite for hosted videos, cached on success;
/// 4. on-device frame extraction near the 1-second mark, cached on success;
/// 5. otherwise [`Resolution::Unavailable`].
///
/// Step 4 is skipped entirely when the extractor reports no capability.
/// Resolution never fails past this function.
pub async fn resolve(
    video_uri: String,
    cover_uri: Option<String>,
    store: ThumbnailStore,
    extractor: Arc<dyn FrameExtractor>,
    width: StillWidth,
) -> Resolution {
    if let Some(cover) = cover_uri {
        return Resolution::Resolved { uri: cover };
    }

    if let Some(cached) = store.get(&video_uri) {
        return Resolution::Resolved { uri: cached };
    }

    if let Some(still) = still_frame_url(&video_uri, width) {
        store.insert(video_uri.clone(), still.clone());
        return Resolution::Resolved { uri: still };
    }

    if extractor.is_available() {
        match extractor.extract_still(&video_uri, Duration::from_millis(EXTRACT_AT_MS), width) {
            Ok(extracted) => {
                store.insert(video_uri.clone(), extracted.clone());
                return Resolution::Resolved { uri: extracted };
            }
            Err(err) => {
                eprintln!("Thumbnail extraction failed for {video_uri}: {err}");
            }
        }
    }

    Resolution::Unavailable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, MediaError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Extractor that counts invocations and returns a fixed preview path.
    struct CountingExtractor {
        calls: AtomicUsize,
        available: bool,
        fail: bool,
    }

    impl CountingExtractor {
        fn new(available: bool, fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                available,
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl FrameExtractor for CountingExtractor {
        fn is_available(&self) -> bool {
            self.available
        }

        fn extract_still(&self, uri: &str, _at: Duration, _width: StillWidth) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(Error::Media(MediaError::DecodeFailed("boom".to_string())))
            } else {
                Ok(format!("/tmp/previews/{}.jpg", uri.len()))
            }
        }
    }

    #[tokio::test]
    async fn explicit_cover_short_circuits_everything() {
        let store = ThumbnailStore::new();
        let extractor = Arc::new(CountingExtractor::new(true, false));

        let resolution = resolve(
            "https://m.example/upload/abc/def.mp4".to_string(),
            Some("https://cdn.example/cover.jpg".to_string()),
            store.clone(),
            extractor.clone(),
            StillWidth::default(),
        )
        .await;

        assert_eq!(
            resolution.uri(),
            Some("https://cdn.example/cover.jpg")
        );
        // Neither the store nor the extractor may be touched
        assert!(store.is_empty());
        assert_eq!(extractor.calls(), 0);
    }

    #[tokio::test]
    async fn cached_entry_wins_over_provider_and_extraction() {
        let store = ThumbnailStore::new();
        store.insert("v.mp4", "cached.jpg");
        let extractor = Arc::new(CountingExtractor::new(true, false));

        let resolution = resolve(
            "v.mp4".to_string(),
            None,
            store.clone(),
            extractor.clone(),
            StillWidth::default(),
        )
        .await;

        assert_eq!(resolution.uri(), Some("cached.jpg"));
        assert_eq!(extractor.calls(), 0);
    }

    #[tokio::test]
    async fn provider_match_is_cached_without_extraction() {
        let store = ThumbnailStore::new();
        let extractor = Arc::new(CountingExtractor::new(true, false));

        let resolution = resolve(
            "https://m.example/upload/abc/def.mp4".to_string(),
            None,
            store.clone(),
            extractor.clone(),
            StillWidth::default(),
        )
        .await;

        let expected = "https://m.example/upload/so_0,f_jpg,q_auto,w_800/abc/def.jpg";
        assert_eq!(resolution.uri(), Some(expected));
        assert_eq!(
            store.get("https://m.example/upload/abc/def.mp4").as_deref(),
            Some(expected)
        );
        assert_eq!(extractor.calls(), 0);
    }

    #[tokio::test]
    async fn extraction_is_the_last_resort_and_caches() {
        let store = ThumbnailStore::new();
        let extractor = Arc::new(CountingExtractor::new(true, false));

        let resolution = resolve(
            "https://cdn.example/raw/clip.mp4".to_string(),
            None,
            store.clone(),
            extractor.clone(),
            StillWidth::default(),
        )
        .await;

        assert!(resolution.uri().is_some());
        assert_eq!(extractor.calls(), 1);
        assert_eq!(store.len(), 1);

        // A second resolution hits the store, not the extractor
        let again = resolve(
            "https://cdn.example/raw/clip.mp4".to_string(),
            None,
            store.clone(),
            extractor.clone(),
            StillWidth::default(),
        )
        .await;
        assert_eq!(again, resolution);
        assert_eq!(extractor.calls(), 1);
    }

    #[tokio::test]
    async fn extraction_failure_degrades_to_unavailable() {
        let store = ThumbnailStore::new();
        let extractor = Arc::new(CountingExtractor::new(true, true));

        let resolution = resolve(
            "https://cdn.example/raw/clip.mp4".to_string(),
            None,
            store.clone(),
            extractor,
            StillWidth::default(),
        )
        .await;

        assert_eq!(resolution, Resolution::Unavailable);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unavailable_extractor_skips_extraction() {
        let store = ThumbnailStore::new();
        let extractor = Arc::new(CountingExtractor::new(false, false));

        let resolution = resolve(
            "https://cdn.example/raw/clip.mp4".to_string(),
            None,
            store.clone(),
            extractor.clone(),
            StillWidth::default(),
        )
        .await;

        assert_eq!(resolution, Resolution::Unavailable);
        assert_eq!(extractor.calls(), 0);
    }
}
