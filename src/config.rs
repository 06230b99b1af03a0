// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Canonical constants shared by the glove and the hand.
//!
//! The glove and hand firmware went through several revisions that disagreed on the value range,
//! the sensor floor and which finger is mounted backwards. The values below are the current ones.
//! The older combination is kept as [`crate::control::mapping::MappingConfig::HISTORICAL`] and
//! [`HISTORICAL_VMAX`].

/// Number of fingers on the glove and servos on the hand.
pub const NUM_FINGERS: usize = 5;

/// Largest finger value carried on the wire.
pub const VMAX: u8 = 9;

/// Largest finger value used by the first glove revision.
pub const HISTORICAL_VMAX: u8 = 7;

/// Finger values below this are sensor noise and are raised to it before normalization.
pub const SENSOR_FLOOR: u8 = 2;

/// Finger whose servo is mounted in reverse (little finger, PCA9685 CH4).
pub const INVERTED_FINGER: usize = 4;

/// Sign correction applied to every finger. The glove reports 0 for an open hand.
pub const INVERT_ALL: bool = true;

// Servo pulse window (SG90 safe range)
pub const PULSE_MIN_US: f32 = 800.0;
pub const PULSE_CENTER_US: f32 = 1500.0;
pub const PULSE_MAX_US: f32 = 2200.0;

/// Servo refresh rate.
pub const SERVO_FREQ_HZ: f32 = 50.0;

/// 7-bit I²C address of the PCA9685 with all address straps low.
pub const PCA9685_ADDR: u8 = 0x40;

/// Glove sampling / transmit period.
pub const SAMPLE_PERIOD_MS: u32 = 250;

/// Mux settling time before each ADC sample. Too short and neighbouring fingers ghost into each
/// other.
pub const MUX_SETTLE_US: u32 = 15;

// Raw ADC window of a Hall sensor: magnet close (open hand) .. magnet far (closed hand)
pub const RAW_MIN: u16 = 1200;
pub const RAW_MAX: u16 = 3350;

/// Largest accepted frame, in bytes.
pub const MAX_FRAME_LEN: usize = 128;

/// Serial link baud rate between glove and hand.
pub const LINK_BAUD: u32 = 115_200;
