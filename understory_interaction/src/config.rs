// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tuning.
//!
//! With the `serde` feature, [`GestureConfig`] reads from partial documents; missing
//! fields keep their defaults:
//!
//! ```toml
//! tap_delay_ms = 250
//! touch_offsets = [{ x = 8.0 }, { x = -16.0 }]
//! ```

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Vec2;

use crate::error::ConfigError;

/// One step of the touch retry search.
///
/// Steps are cumulative: each shifts the probe from where the previous step left it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TouchOffset {
    /// Horizontal shift in scene units.
    pub x: f64,
    /// Vertical shift in scene units.
    pub y: f64,
}

impl TouchOffset {
    /// Offset by `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// As a vector.
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Engine-wide gesture tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Longest touch (start to end) still classified as a tap.
    /// A second tap within half of this after the previous one is a double tap.
    pub tap_delay_ms: u64,
    /// Clicks and double clicks are dropped once this many drag moves were seen
    /// since the last press.
    pub click_suppress_threshold: u32,
    /// Retry steps for touches that land on nothing.
    pub touch_offsets: Vec<TouchOffset>,
}

impl GestureConfig {
    /// Default tap delay.
    pub const DEFAULT_TAP_DELAY_MS: u64 = 300;
    /// Default click suppression threshold.
    pub const DEFAULT_CLICK_SUPPRESS_THRESHOLD: u32 = 5;

    /// Default retry steps: right, left, below, above the contact point, 10 units each.
    pub fn default_touch_offsets() -> Vec<TouchOffset> {
        vec![
            TouchOffset::new(10.0, 0.0),
            TouchOffset::new(-20.0, 0.0),
            TouchOffset::new(10.0, 10.0),
            TouchOffset::new(0.0, -20.0),
        ]
    }

    /// Builder-style helper to set the tap delay.
    #[must_use]
    pub fn with_tap_delay_ms(mut self, ms: u64) -> Self {
        self.tap_delay_ms = ms;
        self
    }

    /// Builder-style helper to set the click suppression threshold.
    #[must_use]
    pub fn with_click_suppress_threshold(mut self, threshold: u32) -> Self {
        self.click_suppress_threshold = threshold;
        self
    }

    /// Builder-style helper to replace the touch retry steps.
    #[must_use]
    pub fn with_touch_offsets(mut self, offsets: Vec<TouchOffset>) -> Self {
        self.touch_offsets = offsets;
        self
    }

    /// Double-tap window: half the tap delay.
    pub const fn double_tap_window_ms(&self) -> u64 {
        self.tap_delay_ms / 2
    }

    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tap_delay_ms == 0 {
            return Err(ConfigError::ZeroTapDelay);
        }
        if self.click_suppress_threshold == 0 {
            return Err(ConfigError::ZeroClickThreshold);
        }
        if let Some(index) = self
            .touch_offsets
            .iter()
            .position(|o| !o.x.is_finite() || !o.y.is_finite())
        {
            return Err(ConfigError::NonFiniteOffset { index });
        }
        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_delay_ms: Self::DEFAULT_TAP_DELAY_MS,
            click_suppress_threshold: Self::DEFAULT_CLICK_SUPPRESS_THRESHOLD,
            touch_offsets: Self::default_touch_offsets(),
        }
    }
}
