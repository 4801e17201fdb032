// SPDX-License-Identifier: MPL-2.0
//! Decoded-image cache for feed scrolling.
//!
//! Feed lists rebind the same posts as the user scrolls up and down; caching
//! decoded images avoids refetching and redecoding them on every rebind.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used images are evicted first
//! - **Memory-bounded**: Total cache size limited by configurable byte limit
//! - **URI-keyed**: Images indexed by their media URI
//!
//! The thumbnail *store* ([`crate::thumbnail::ThumbnailStore`]) is a separate
//! thing: it memoizes resolved preview URIs and never evicts.

use crate::config::defaults::{
    DEFAULT_IMAGE_CACHE_BYTES, DEFAULT_MAX_IMAGES, MAX_IMAGE_CACHE_BYTES, MAX_MAX_IMAGES,
    MIN_IMAGE_CACHE_BYTES, MIN_MAX_IMAGES,
};
use crate::media::ImageData;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Configuration for the decoded-image cache.
#[derive(Debug, Clone, Copy)]
pub struct ImageCacheConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of images to cache.
    pub max_images: usize,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_IMAGE_CACHE_BYTES,
            max_images: DEFAULT_MAX_IMAGES,
        }
    }
}

impl ImageCacheConfig {
    /// Creates a new cache configuration, clamping limits to valid ranges.
    #[must_use]
    pub fn new(max_bytes: usize, max_images: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_IMAGE_CACHE_BYTES, MAX_IMAGE_CACHE_BYTES),
            max_images: max_images.clamp(MIN_MAX_IMAGES, MAX_MAX_IMAGES),
        }
    }
}

/// Cached image entry with its byte size.
#[derive(Debug, Clone)]
struct CacheEntry {
    image: Arc<ImageData>,
    size_bytes: usize,
}

impl CacheEntry {
    fn new(image: ImageData) -> Self {
        let size_bytes = image.size_bytes();
        Self {
            image: Arc::new(image),
            size_bytes,
        }
    }
}

/// Statistics about image cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCacheStats {
    /// Number of images currently in cache.
    pub image_count: usize,

    /// Total bytes currently used by cached images.
    pub total_bytes: usize,

    /// Number of cache hits (image found).
    pub hits: u64,

    /// Number of cache misses (image not found).
    pub misses: u64,

    /// Number of images evicted due to limits.
    pub evictions: u64,

    /// Number of images inserted.
    pub insertions: u64,
}

impl ImageCacheStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache of decoded feed images, keyed by media URI.
pub struct ImageCache {
    cache: LruCache<String, CacheEntry>,
    config: ImageCacheConfig,
    current_bytes: usize,
    stats: ImageCacheStats,
}

impl ImageCache {
    /// Creates a new image cache with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `DEFAULT_MAX_IMAGES` is zero, which would indicate a build
    /// configuration error.
    #[must_use]
    pub fn new(config: ImageCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_images).unwrap_or(
            NonZeroUsize::new(DEFAULT_MAX_IMAGES).expect("DEFAULT_MAX_IMAGES must be non-zero"),
        );

        Self {
            cache: LruCache::new(capacity),
            config,
            current_bytes: 0,
            stats: ImageCacheStats::default(),
        }
    }

    /// Creates a new image cache with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ImageCacheConfig::default())
    }

    /// Inserts a decoded image into the cache.
    ///
    /// Returns `true` if the image was inserted, `false` if it is too large
    /// to ever fit.
    pub fn insert(&mut self, uri: String, image: ImageData) -> bool {
        let entry = CacheEntry::new(image);
        let image_size = entry.size_bytes;

        // Don't cache images larger than half the cache budget
        if image_size > self.config.max_bytes / 2 {
            return false;
        }

        // Evict images until we have room
        while self.current_bytes + image_size > self.config.max_bytes && !self.cache.is_empty() {
            if let Some((_, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes);
                self.stats.evictions += 1;
            }
        }

        // Replacing an existing entry must not double-count its bytes
        if let Some(existing) = self.cache.pop(&uri) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes);
        }

        self.current_bytes += entry.size_bytes;
        self.cache.put(uri, entry);
        self.stats.insertions += 1;
        self.stats.image_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;

        true
    }

    /// Gets an image from the cache by URI, updating LRU order on access.
    pub fn get(&mut self, uri: &str) -> Option<Arc<ImageData>> {
        match self.cache.get(uri) {
            Some(entry) => {
                self.stats.hits += 1;
                Some(Arc::clone(&entry.image))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Checks for an entry without touching LRU order or statistics.
    #[must_use]
    pub fn contains(&self, uri: &str) -> bool {
        self.cache.contains(uri)
    }

    /// Removes all cached images.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
        self.stats.image_count = 0;
        self.stats.total_bytes = 0;
    }

    /// Returns a snapshot of cache statistics.
    #[must_use]
    pub fn stats(&self) -> ImageCacheStats {
        self.stats
    }

    /// Returns the number of cached images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Checks if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image(width: u32, height: u32) -> ImageData {
        ImageData::from_rgba(width, height, vec![0_u8; (width * height * 4) as usize])
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = ImageCache::with_defaults();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn insert_and_get_round_trip() {
        let mut cache = ImageCache::with_defaults();
        assert!(cache.insert("a.jpg".to_string(), test_image(10, 10)));

        let hit = cache.get("a.jpg");
        assert!(hit.is_some());
        assert_eq!(hit.unwrap().width, 10);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn miss_is_counted() {
        let mut cache = ImageCache::with_defaults();
        assert!(cache.get("nope.jpg").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn oversized_image_is_rejected() {
        let mut cache = ImageCache::new(ImageCacheConfig::new(MIN_IMAGE_CACHE_BYTES, 4));
        // 2048x1024 RGBA = 8 MB, more than half the 8 MB minimum budget
        assert!(!cache.insert("huge.jpg".to_string(), test_image(2048, 1024)));
        assert!(cache.is_empty());
    }

    #[test]
    fn byte_budget_evicts_least_recently_used() {
        let mut cache = ImageCache::new(ImageCacheConfig::new(MIN_IMAGE_CACHE_BYTES, 8));
        // Each 512x512 RGBA image is 1 MB; the budget holds 8
        for i in 0..8 {
            assert!(cache.insert(format!("img{i}.jpg"), test_image(512, 512)));
        }
        assert_eq!(cache.len(), 8);

        // Touch img0 so img1 becomes the eviction candidate
        assert!(cache.get("img0.jpg").is_some());

        assert!(cache.insert("img8.jpg".to_string(), test_image(512, 512)));
        assert!(cache.contains("img0.jpg"));
        assert!(!cache.contains("img1.jpg"));
        assert!(cache.stats().evictions >= 1);
    }

    #[test]
    fn replacing_entry_does_not_double_count_bytes() {
        let mut cache = ImageCache::with_defaults();
        cache.insert("a.jpg".to_string(), test_image(100, 100));
        let bytes_before = cache.stats().total_bytes;

        cache.insert("a.jpg".to_string(), test_image(100, 100));
        assert_eq!(cache.stats().total_bytes, bytes_before);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_resets_contents_and_sizes() {
        let mut cache = ImageCache::with_defaults();
        cache.insert("a.jpg".to_string(), test_image(10, 10));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().total_bytes, 0);
    }

    #[test]
    fn hit_rate_reflects_hits_and_misses() {
        let mut cache = ImageCache::with_defaults();
        cache.insert("a.jpg".to_string(), test_image(4, 4));
        let _ = cache.get("a.jpg");
        let _ = cache.get("b.jpg");

        let rate = cache.stats().hit_rate();
        assert!((rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn config_clamps_to_valid_ranges() {
        let config = ImageCacheConfig::new(0, 0);
        assert_eq!(config.max_bytes, MIN_IMAGE_CACHE_BYTES);
        assert_eq!(config.max_images, MIN_MAX_IMAGES);

        let config = ImageCacheConfig::new(usize::MAX, usize::MAX);
        assert_eq!(config.max_bytes, MAX_IMAGE_CACHE_BYTES);
        assert_eq!(config.max_images, MAX_MAX_IMAGES);
    }
}
