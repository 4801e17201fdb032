// SPDX-License-Identifier: MPL-2.0
//! Fetching and decoding of image bytes referenced by feed media URIs.
//!
//! Remote `http(s)` URIs go through reqwest; anything else is treated as a
//! local path and read from disk. Decoding happens with the `image` crate and
//! produces an [`ImageData`] ready for the Iced image widget.

use crate::error::{Error, MediaError, Result};
use iced::widget::image;
use std::sync::Arc;

/// A decoded image together with its dimensions.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
    /// Original RGBA bytes, shared to keep clones cheap.
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let rgba_bytes = Arc::new(pixels);
        let handle = image::Handle::from_rgba(width, height, rgba_bytes.to_vec());
        Self {
            handle,
            width,
            height,
            rgba_bytes,
        }
    }

    /// Returns a reference to the original RGBA bytes.
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Size of this image in bytes (width * height * 4 for RGBA).
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Returns true when the URI needs a network round trip.
fn is_remote(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

/// Strips a `file://` scheme, leaving other URIs untouched.
fn local_path(uri: &str) -> &str {
    uri.strip_prefix("file://").unwrap_or(uri)
}

/// Retrieves the raw bytes behind a media URI.
async fn fetch_bytes(uri: &str) -> Result<Vec<u8>> {
    if is_remote(uri) {
        let response = reqwest::get(uri)
            .await
            .map_err(|e| Error::Media(MediaError::FetchFailed(e.to_string())))?;
        if !response.status().is_success() {
            return Err(Error::Media(MediaError::FetchFailed(format!(
                "HTTP {} for {uri}",
                response.status()
            ))));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Media(MediaError::FetchFailed(e.to_string())))?;
        Ok(bytes.to_vec())
    } else {
        std::fs::read(local_path(uri))
            .map_err(|e| Error::Media(MediaError::FetchFailed(e.to_string())))
    }
}

/// Fetches and decodes an image referenced by `uri`.
///
/// # Errors
///
/// Returns a [`MediaError::FetchFailed`] when the bytes cannot be retrieved,
/// or [`MediaError::DecodeFailed`] when they are not a decodable image.
pub async fn fetch_image(uri: String) -> Result<ImageData> {
    let bytes = fetch_bytes(&uri).await?;

    let decoded = image_rs::load_from_memory(&bytes)
        .map_err(|e| Error::Media(MediaError::DecodeFailed(e.to_string())))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(ImageData::from_rgba(width, height, rgba.into_raw()))
}
