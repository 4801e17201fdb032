// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the component. Constants are organized by category.
//!
//! # Categories
//!
//! - **Dwell**: Visibility debounce before a post counts as centered
//! - **Thumbnail**: Still-frame width and extraction timestamp
//! - **Image Cache**: Decoded-image caching for feed scrolling

// ==========================================================================
// Dwell Defaults
// ==========================================================================

/// Default dwell before a visible post counts as centered (in milliseconds).
pub const DEFAULT_DWELL_MS: u64 = 500;

/// Minimum dwell delay (in milliseconds).
pub const MIN_DWELL_MS: u64 = 100;

/// Maximum dwell delay (in milliseconds).
pub const MAX_DWELL_MS: u64 = 5000;

// ==========================================================================
// Thumbnail Defaults
// ==========================================================================

/// Default width of resolved still frames (in pixels).
pub const DEFAULT_STILL_WIDTH: u32 = 800;

/// Minimum still-frame width.
pub const MIN_STILL_WIDTH: u32 = 160;

/// Maximum still-frame width.
pub const MAX_STILL_WIDTH: u32 = 1600;

/// Timestamp to extract the on-device still frame at (in milliseconds).
/// The first second usually skips black lead-in frames.
pub const EXTRACT_AT_MS: u64 = 1000;

// ==========================================================================
// Image Cache Defaults
// ==========================================================================

/// Default decoded-image cache size in bytes (32 MB).
/// Allows ~4 full HD images (8 MB each) or ~16 smaller images.
pub const DEFAULT_IMAGE_CACHE_BYTES: usize = 32 * 1024 * 1024;

/// Minimum decoded-image cache size in bytes (8 MB).
pub const MIN_IMAGE_CACHE_BYTES: usize = 8 * 1024 * 1024;

/// Maximum decoded-image cache size in bytes (128 MB).
pub const MAX_IMAGE_CACHE_BYTES: usize = 128 * 1024 * 1024;

/// Default maximum number of decoded images to cache.
pub const DEFAULT_MAX_IMAGES: usize = 16;

/// Minimum images to cache.
pub const MIN_MAX_IMAGES: usize = 4;

/// Maximum images to cache.
pub const MAX_MAX_IMAGES: usize = 32;
