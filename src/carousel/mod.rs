// SPDX-License-Identifier: MPL-2.0
//! Carousel paging state: the horizontally paged media list, the settled
//! page index, and the derived dot indicator.
//!
//! The carousel itself never talks to decoders. It reports settled index
//! changes (idempotently) and, combined with the visibility tracker's
//! verdict, feeds the per-slide activation predicate.

pub mod dwell;
pub mod visibility;

pub use dwell::DwellDelay;
pub use visibility::VisibilityTracker;

use crate::media::MediaItem;

/// Computes whether a slide may hold decoder resources.
///
/// This is the single activation predicate; every consumer goes through
/// here so two slides can never disagree about which one is active.
#[must_use]
pub fn activation(is_centered: bool, is_active_page: bool) -> bool {
    is_centered && is_active_page
}

/// Dot-indicator state, a pure function of `(active_index, item count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotIndicator {
    /// Total number of dots.
    pub total: usize,
    /// Index of the highlighted dot.
    pub active: usize,
}

/// Paging state for one post's media carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    /// Ordered media items; order is display order.
    items: Vec<MediaItem>,
    /// Index of the page currently settled into view.
    active_index: usize,
}

impl CarouselState {
    /// Creates a carousel resting on its first page.
    #[must_use]
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            active_index: 0,
        }
    }

    /// Returns the ordered media items.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Returns the number of media items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the carousel has no media.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the index of the page currently settled into view.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Whether the given slide is the page currently swiped into view.
    #[must_use]
    pub fn is_active_page(&self, index: usize) -> bool {
        index == self.active_index
    }

    /// Processes a scroll-settle event.
    ///
    /// The settled index is `round(offset / page_width)` clamped to the
    /// valid range. Returns `Some(index)` only when the settled index
    /// differs from the previously reported one — repeated identical
    /// offsets must not re-fire the change.
    pub fn settle(&mut self, offset: f32, page_width: f32) -> Option<usize> {
        if self.items.is_empty() || page_width <= 0.0 || !offset.is_finite() {
            return None;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = ((offset / page_width).round().max(0.0) as usize).min(self.items.len() - 1);

        if index == self.active_index {
            return None;
        }
        self.active_index = index;
        Some(index)
    }

    /// Returns the dot-indicator state for the current page.
    #[must_use]
    pub fn dot_indicator(&self) -> DotIndicator {
        DotIndicator {
            total: self.items.len(),
            active: self.active_index,
        }
    }
}
