// SPDX-License-Identifier: MPL-2.0
//! Image slide sub-component.
//!
//! The non-video path needs no state machine: a low-detail placeholder
//! shows immediately, the decoded image swaps in on load, and a fixed error
//! affordance replaces it on failure. Two flags cover every case.

use crate::error::Error;
use crate::media::ImageData;
use std::sync::Arc;

/// State for one image slide.
#[derive(Debug, Clone)]
pub struct ImageSlide {
    /// URI of the image this slide shows.
    uri: String,
    /// Whether a fetch is in flight.
    loading: bool,
    /// Whether the fetch failed terminally.
    error: bool,
    /// The decoded image, once loaded.
    image: Option<Arc<ImageData>>,
}

impl ImageSlide {
    /// Creates a slide with its fetch considered in flight.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            loading: true,
            error: false,
            image: None,
        }
    }

    /// Creates a slide that is already loaded (cache hit on mount).
    #[must_use]
    pub fn loaded(uri: impl Into<String>, image: Arc<ImageData>) -> Self {
        Self {
            uri: uri.into(),
            loading: false,
            error: false,
            image: Some(image),
        }
    }

    /// Records the fetch outcome.
    pub fn handle_loaded(&mut self, result: Result<Arc<ImageData>, Error>) {
        self.loading = false;
        match result {
            Ok(image) => {
                self.image = Some(image);
                self.error = false;
            }
            Err(err) => {
                eprintln!("Image load failed for {}: {err}", self.uri);
                self.error = true;
            }
        }
    }

    /// Returns the image URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Whether the fetch is still in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the slide shows the fixed error affordance.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// The decoded image, once loaded.
    #[must_use]
    pub fn image(&self) -> Option<&Arc<ImageData>> {
        self.image.as_ref()
    }
}
