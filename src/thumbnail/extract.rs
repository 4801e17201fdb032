// SPDX-License-Identifier: MPL-2.0
//! On-device still-frame extraction port and its FFmpeg adapter.
//!
//! The resolver only needs "give me a reduced-quality still near this
//! timestamp, as a local file URI" — the [`FrameExtractor`] trait captures
//! exactly that. Deployment targets that cannot decode on device (web-style
//! builds) plug in [`NullExtractor`] and the resolver skips straight to the
//! placeholder path.

use crate::error::{Error, MediaError, Result};
use crate::thumbnail::provider::StillWidth;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with appropriate log level.
///
/// This function is safe to call multiple times - initialization will only
/// happen once thanks to `std::sync::Once`. It sets the FFmpeg log level
/// to ERROR to suppress noisy container warnings.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Port for on-device still-frame extraction.
///
/// Implementations must be cheap to share across resolution futures; the
/// adapter itself holds no per-video state.
pub trait FrameExtractor: Send + Sync {
    /// Whether this target can extract frames at all.
    fn is_available(&self) -> bool;

    /// Extracts a still frame near `at`, downscaled to `width`, and returns
    /// the URI of the written preview file.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaError`] when the source cannot be opened, decoded,
    /// or the preview cannot be written.
    fn extract_still(&self, uri: &str, at: Duration, width: StillWidth) -> Result<String>;
}

/// FFmpeg-backed extractor for native targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegExtractor;

impl FfmpegExtractor {
    /// Directory previews are written into.
    fn preview_dir() -> PathBuf {
        std::env::temp_dir().join("iced_feed_previews")
    }

    /// Deterministic preview path for a source URI, so repeated extraction
    /// of the same video overwrites rather than accumulates.
    fn preview_path(uri: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        uri.hash(&mut hasher);
        Self::preview_dir().join(format!("{:016x}.jpg", hasher.finish()))
    }
}

impl FrameExtractor for FfmpegExtractor {
    fn is_available(&self) -> bool {
        true
    }

    fn extract_still(&self, uri: &str, at: Duration, width: StillWidth) -> Result<String> {
        init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(&uri)
            .map_err(|e| Error::Media(MediaError::from_message(&e.to_string())))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(Error::Media(MediaError::NoVideoStream))?;
        let video_stream_index = input.index();

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Media(MediaError::DecodeFailed(e.to_string())))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Media(MediaError::DecodeFailed(e.to_string())))?;

        let src_width = decoder.width();
        let src_height = decoder.height();
        if src_width == 0 || src_height == 0 {
            return Err(Error::Media(MediaError::DecodeFailed(format!(
                "invalid video dimensions: {src_width}x{src_height}"
            ))));
        }

        // Seek near the requested timestamp; clips shorter than the target
        // simply decode from wherever the demuxer lands.
        #[allow(clippy::cast_possible_truncation)]
        let timestamp = (at.as_secs_f64() * 1_000_000.0) as i64;
        // A failed seek decodes from the start instead
        let _ = ictx.seek(timestamp, ..timestamp);

        // Reduced quality: downscale to the configured still width
        let dst_width = width.value().min(src_width);
        let dst_height =
            ((u64::from(src_height) * u64::from(dst_width)) / u64::from(src_width)).max(1) as u32;

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            src_width,
            src_height,
            ffmpeg_next::format::Pixel::RGBA,
            dst_width,
            dst_height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Media(MediaError::DecodeFailed(e.to_string())))?;

        let mut rgba_frame = ffmpeg_next::frame::Video::empty();

        for (stream, packet) in ictx.packets() {
            if stream.index() == video_stream_index {
                decoder
                    .send_packet(&packet)
                    .map_err(|e| Error::Media(MediaError::DecodeFailed(e.to_string())))?;

                let mut decoded = ffmpeg_next::frame::Video::empty();
                if decoder.receive_frame(&mut decoded).is_ok() {
                    scaler
                        .run(&decoded, &mut rgba_frame)
                        .map_err(|e| Error::Media(MediaError::DecodeFailed(e.to_string())))?;
                    break;
                }
            }
        }

        if rgba_frame.data(0).is_empty() {
            return Err(Error::Media(MediaError::DecodeFailed(
                "could not decode a frame".to_string(),
            )));
        }

        // Copy frame data (handle stride)
        let frame_width = rgba_frame.width();
        let frame_height = rgba_frame.height();
        let data = rgba_frame.data(0);
        let stride = rgba_frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity((frame_width * frame_height * 4) as usize);
        for y in 0..frame_height {
            let row_start = (y as usize) * stride;
            let row_end = row_start + (frame_width * 4) as usize;
            rgba_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        let buffer = image_rs::RgbaImage::from_raw(frame_width, frame_height, rgba_bytes)
            .ok_or_else(|| {
                Error::Media(MediaError::DecodeFailed("frame buffer mismatch".to_string()))
            })?;

        let path = Self::preview_path(uri);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Media(MediaError::Other(e.to_string())))?;
        }
        image_rs::DynamicImage::ImageRgba8(buffer)
            .to_rgb8()
            .save(&path)
            .map_err(|e| Error::Media(MediaError::Other(e.to_string())))?;

        Ok(path.to_string_lossy().into_owned())
    }
}

/// Extractor for targets without on-device decoding.
///
/// Resolution step 4 is skipped entirely and failures surface as the
/// placeholder glyph.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullExtractor;

impl FrameExtractor for NullExtractor {
    fn is_available(&self) -> bool {
        false
    }

    fn extract_still(&self, _uri: &str, _at: Duration, _width: StillWidth) -> Result<String> {
        Err(Error::Media(MediaError::ExtractionUnavailable))
    }
}
