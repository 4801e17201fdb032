// SPDX-License-Identifier: MPL-2.0
//! Provider-transform inference for hosted videos.
//!
//! Videos hosted under the documented `/upload/` URL convention can serve a
//! still frame through a deterministic URL rewrite; no network round trip is
//! needed to know the rewritten URL is valid. A URL of the form
//! `.../upload/<path>.<ext>` becomes
//! `.../upload/so_0,f_jpg,q_auto,w_<width>/<path>.jpg`.

use crate::config::defaults::{DEFAULT_STILL_WIDTH, MAX_STILL_WIDTH, MIN_STILL_WIDTH};

/// The path segment identifying the hosted-video URL convention.
const UPLOAD_SEGMENT: &str = "/upload/";

/// Width of provider-served still frames in pixels.
///
/// This newtype enforces validity at the type level, ensuring the value is
/// always within the valid range (160–1600 pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StillWidth(u32);

impl StillWidth {
    /// Creates a new still width, clamping to the valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_STILL_WIDTH, MAX_STILL_WIDTH))
    }

    /// Returns the value as u32.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for StillWidth {
    fn default() -> Self {
        Self(DEFAULT_STILL_WIDTH)
    }
}

/// Synthesizes a still-frame URL for a hosted video, when the URI matches
/// the provider convention.
///
/// Returns `None` when the URI is not of the `.../upload/<path>.<ext>` form;
/// query strings and fragments disqualify the match rather than being
/// carried into the rewritten URL.
#[must_use]
pub fn still_frame_url(video_uri: &str, width: StillWidth) -> Option<String> {
    let (head, tail) = video_uri.split_once(UPLOAD_SEGMENT)?;
    if tail.is_empty() || tail.contains(UPLOAD_SEGMENT) {
        return None;
    }
    if tail.contains(['?', '#']) {
        return None;
    }

    // The last path component must carry an extension to strip
    let file = tail.rsplit('/').next().unwrap_or(tail);
    let (_, ext) = file.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }

    let stem = &tail[..tail.len() - ext.len() - 1];
    Some(format!(
        "{head}{UPLOAD_SEGMENT}so_0,f_jpg,q_auto,w_{}/{stem}.jpg",
        width.value()
    ))
}
