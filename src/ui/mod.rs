// SPDX-License-Identifier: MPL-2.0
//! View layer for the post carousel.
//!
//! The component renders its own lifecycle chrome: thumbnails, placeholder
//! glyphs, play affordances, loading and error states, dots and playback
//! progress. Actual video frames are presented by the host's backend
//! surface; this layer renders everything around them.

pub mod carousel;
pub mod dots;
pub mod slide;

pub use carousel::view;

/// Glyph shown when no thumbnail could be resolved.
pub const PLACEHOLDER_GLYPH: &str = "▦";

/// Glyph inviting playback on a resting video slide.
pub const PLAY_GLYPH: &str = "▶";

/// Glyph shown while resolution or loading is in flight.
pub const BUSY_GLYPH: &str = "…";

/// Glyph for the fixed error affordance.
pub const ERROR_GLYPH: &str = "⚠";
