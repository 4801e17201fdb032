// SPDX-License-Identifier: MPL-2.0
//! Dwell delay domain type for the visibility debounce.
//!
//! This module provides a type-safe wrapper for the stationarity dwell a
//! post must sustain before it counts as centered.

use crate::config::defaults::{DEFAULT_DWELL_MS, MAX_DWELL_MS, MIN_DWELL_MS};

/// Dwell delay in milliseconds before a visible post counts as centered.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (100–5000 ms).
///
/// # Example
///
/// ```
/// use iced_feed::carousel::DwellDelay;
///
/// let dwell = DwellDelay::new(500);
/// assert_eq!(dwell.value(), 500);
///
/// // Values outside range are clamped
/// let too_low = DwellDelay::new(1);
/// assert_eq!(too_low.value(), 100); // Clamped to min
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellDelay(u64);

impl DwellDelay {
    /// Creates a new dwell delay, clamping to the valid range.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value.clamp(MIN_DWELL_MS, MAX_DWELL_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> std::time::Duration {
        std::time::Duration::from_millis(self.0)
    }
}

impl Default for DwellDelay {
    fn default() -> Self {
        Self(DEFAULT_DWELL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_valid_range() {
        assert_eq!(DwellDelay::new(0).value(), MIN_DWELL_MS);
        assert_eq!(DwellDelay::new(60_000).value(), MAX_DWELL_MS);
    }

    #[test]
    fn new_accepts_valid_values() {
        assert_eq!(DwellDelay::new(100).value(), 100);
        assert_eq!(DwellDelay::new(500).value(), 500);
        assert_eq!(DwellDelay::new(5000).value(), 5000);
    }

    #[test]
    fn default_returns_expected_value() {
        assert_eq!(DwellDelay::default().value(), DEFAULT_DWELL_MS);
    }

    #[test]
    fn as_duration_converts_correctly() {
        let dwell = DwellDelay::new(500);
        assert_eq!(dwell.as_duration(), std::time::Duration::from_millis(500));
    }

    #[test]
    fn equality_works() {
        assert_eq!(DwellDelay::new(500), DwellDelay::new(500));
        assert_ne!(DwellDelay::new(500), DwellDelay::new(750));
    }
}
