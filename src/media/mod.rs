// SPDX-License-Identifier: MPL-2.0
//! Media model for feed posts: URI-based media references, kind detection
//! heuristics, and the carousel item list built from them.

pub mod fetch;
pub mod image_cache;

// Re-export commonly used types
pub use fetch::{fetch_image, ImageData};
pub use image_cache::{ImageCache, ImageCacheConfig, ImageCacheStats};

/// Represents different kinds of feed media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// One media reference as supplied by the hosting post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    /// Absolute or resolvable URI of the media.
    pub uri: String,
    /// Optional caller-supplied preview override (e.g. a picked cover frame).
    pub cover_uri: Option<String>,
}

impl MediaSource {
    /// Creates a source without a cover override.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            cover_uri: None,
        }
    }

    /// Creates a source with an explicit cover override.
    #[must_use]
    pub fn with_cover(uri: impl Into<String>, cover_uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            cover_uri: Some(cover_uri.into()),
        }
    }
}

/// One element of a post's media list.
///
/// `kind` is derived once at construction and never mutates. `index` is the
/// 0-based position within the carousel and is immutable; item order is
/// display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub uri: String,
    pub kind: MediaKind,
    pub index: usize,
    pub cover_uri: Option<String>,
}

/// Supported media extensions
pub mod extensions {
    /// Image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] =
        &["jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "heif"];

    /// Video file extensions
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "avi", "mov", "mkv", "webm"];

    /// All supported extensions (images + videos)
    #[must_use]
    pub fn all_supported_extensions() -> Vec<&'static str> {
        IMAGE_EXTENSIONS
            .iter()
            .chain(VIDEO_EXTENSIONS.iter())
            .copied()
            .collect()
    }
}

/// Extracts the lowercase file extension from a URI, tolerating query
/// strings and fragments (`.../clip.mp4?sig=abc#t=1` yields `mp4`).
fn uri_extension(uri: &str) -> Option<String> {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Classifies a URI by its extension, if possible.
fn classify_uri(uri: &str) -> Option<MediaKind> {
    let extension = uri_extension(uri)?;
    if extensions::IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Image)
    } else if extensions::VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Detects the media kind of a URI.
///
/// Unclassifiable URIs fall back to [`MediaKind::Image`]: the non-playable
/// path never requests a decoder, so misclassification stays cheap.
#[must_use]
pub fn detect_media_kind(uri: &str) -> MediaKind {
    classify_uri(uri).unwrap_or(MediaKind::Image)
}

/// Builds the ordered carousel item list from host-supplied sources.
///
/// Kind detection runs exactly once per item, here.
#[must_use]
pub fn build_items(sources: &[MediaSource]) -> Vec<MediaItem> {
    sources
        .iter()
        .enumerate()
        .map(|(index, source)| MediaItem {
            uri: source.uri.clone(),
            kind: detect_media_kind(&source.uri),
            index,
            cover_uri: source.cover_uri.clone(),
        })
        .collect()
}
