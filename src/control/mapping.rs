// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Value mapping between raw sensor counts, wire values and servo pulse widths.
//!
//! Works in `no_std` and does not allocate memory.

use crate::config;

/// Clamp `x` into `[min, max]`. Unlike `Ord::clamp` this never panics on an inverted window; the
/// lower bound wins.
#[inline]
pub fn constrain(x: i32, min: i32, max: i32) -> i32 {
    if x > max {
        return max.max(min);
    }
    if x < min {
        return min;
    }
    x
}

/// Linearly map `x` from `[in_min, in_max]` to `[out_min, out_max]` using integer arithmetic,
/// then clamp into the output window.
///
/// Integer division truncates, so a reading halfway between two output steps lands on the lower
/// one. A degenerate input window (`in_min == in_max`) returns `out_min`.
pub fn map_sensor(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }

    // The product of two full-width i32 spans needs more than 64 bits.
    let (x, in_min, in_max) = (x as i128, in_min as i128, in_max as i128);
    let (out_min, out_max) = (out_min as i128, out_max as i128);

    let mapped = (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min;

    mapped.clamp(out_min.min(out_max), out_min.max(out_max)) as i32
}

/// Parameters of the finger value → pulse width mapping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MappingConfig {
    /// Largest finger value.
    pub vmax: u8,
    /// Values below the floor are treated as the floor.
    pub floor: u8,
    /// Flip every finger (`1 - fraction`).
    pub invert_all: bool,
    /// Finger whose servo is mounted in reverse, flipped after `invert_all`.
    pub inverted_finger: Option<usize>,
    pub pulse_min_us: f32,
    pub pulse_max_us: f32,
}

impl MappingConfig {
    /// Current hand: noise floor, global sign flip and a reversed little finger.
    pub const CANONICAL: Self = Self {
        vmax: config::VMAX,
        floor: config::SENSOR_FLOOR,
        invert_all: config::INVERT_ALL,
        inverted_finger: Some(config::INVERTED_FINGER),
        pulse_min_us: config::PULSE_MIN_US,
        pulse_max_us: config::PULSE_MAX_US,
    };

    /// First hand revision: full `[0, VMAX]` range and only the reversed little finger.
    pub const HISTORICAL: Self = Self {
        vmax: config::VMAX,
        floor: 0,
        invert_all: false,
        inverted_finger: Some(config::INVERTED_FINGER),
        pulse_min_us: config::PULSE_MIN_US,
        pulse_max_us: config::PULSE_MAX_US,
    };

    /// Override the sensor floor.
    pub fn with_floor(mut self, floor: u8) -> Self {
        self.floor = floor;
        self
    }

    /// Override the reversed finger.
    pub fn with_inverted_finger(mut self, finger: Option<usize>) -> Self {
        self.inverted_finger = finger;
        self
    }

    /// Normalized position of finger `channel` for a wire value, in `[0, 1]`.
    pub fn fraction(&self, channel: usize, value: i32) -> f32 {
        let vmax = self.vmax as i32;
        let floor = self.floor as i32;

        let v = constrain(value, 0, vmax);
        let v = if v < floor { floor } else { v };

        let mut span = (vmax - floor) as f32;
        if span < 1.0 {
            span = 1.0;
        }

        let mut norm = (v - floor) as f32 / span;

        // Order matters: the global flip first, then the per-finger mounting flip.
        if self.invert_all {
            norm = 1.0 - norm;
        }
        if self.inverted_finger == Some(channel) {
            norm = 1.0 - norm;
        }

        norm
    }

    /// Pulse width in microseconds for finger `channel` at wire value `value`.
    pub fn value_to_pulse(&self, channel: usize, value: i32) -> f32 {
        let norm = self.fraction(channel, value);
        self.pulse_min_us + norm * (self.pulse_max_us - self.pulse_min_us)
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// [`MappingConfig::value_to_pulse`] with the canonical configuration.
#[inline]
pub fn value_to_pulse(channel: usize, value: i32) -> f32 {
    MappingConfig::CANONICAL.value_to_pulse(channel, value)
}
