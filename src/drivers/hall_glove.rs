// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hall-effect flex sensor glove.
//!
//! Five ratiometric Hall sensors, one per finger, share a single ADC input through an 8:1 analog
//! mux. Each finger has a magnet that moves away from its sensor as the finger closes.
//!
//! Wiring:
//! - Mux A/B/C: select lines (channel = C·4 + B·2 + A)
//! - Mux COM:   ADC input
//! - Mux Y0–Y4: thumb, index, middle, ring, little
//!
//! Readings are reported as raw flexion in `[0, output_max]`. What "open" and "closed" mean for
//! the actuator is left to the consumer.

use embedded_hal::blocking::delay::DelayUs;

use crate::config::{self, NUM_FINGERS};
use crate::control::mapping::map_sensor;
use crate::hw::{ChannelSelect, SampleSource};

/// Raw ADC window of one sensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Calibration {
    /// Reading with the finger fully open.
    pub raw_min: u16,
    /// Reading with the finger fully closed.
    pub raw_max: u16,
}

impl Calibration {
    pub const fn new(raw_min: u16, raw_max: u16) -> Self {
        Self { raw_min, raw_max }
    }

    /// Map a raw reading into `[0, output_max]`.
    #[inline]
    pub fn normalize(&self, raw: u16, output_max: u8) -> u8 {
        map_sensor(
            raw as i32,
            self.raw_min as i32,
            self.raw_max as i32,
            0,
            output_max as i32,
        ) as u8
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new(config::RAW_MIN, config::RAW_MAX)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AcquisitionConfig {
    pub calibration: [Calibration; NUM_FINGERS],
    /// Top of the normalized range.
    pub output_max: u8,
    /// Wait between switching the mux and sampling.
    pub settle_us: u32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            calibration: [Calibration::default(); NUM_FINGERS],
            output_max: config::VMAX,
            settle_us: config::MUX_SETTLE_US,
        }
    }
}

/// Glove sensor front end: mux, ADC and a microsecond delay for settling.
pub struct HallGlove<MUX, ADC, D> {
    mux: MUX,
    adc: ADC,
    delay: D,
    config: AcquisitionConfig,
}

impl<MUX, ADC, D> HallGlove<MUX, ADC, D>
where
    MUX: ChannelSelect,
    ADC: SampleSource,
    D: DelayUs<u32>,
{
    pub fn new(mux: MUX, adc: ADC, delay: D, config: AcquisitionConfig) -> Self {
        Self {
            mux,
            adc,
            delay,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Change the mux settling time.
    pub fn set_settle_us(&mut self, settle_us: u32) {
        self.config.settle_us = settle_us;
    }

    /// Replace one finger's calibration window. Out-of-range fingers are ignored.
    pub fn set_calibration(&mut self, finger: usize, calibration: Calibration) {
        if let Some(slot) = self.config.calibration.get_mut(finger) {
            *slot = calibration;
        }
    }

    /// Select `channel`, wait for the mux to settle and take one raw sample.
    pub fn read_raw(&mut self, channel: u8) -> Result<u16, MUX::Error> {
        self.mux.select_channel(channel)?;
        self.delay.delay_us(self.config.settle_us);
        Ok(self.adc.read_sample())
    }

    /// Raw samples of every finger, in finger order.
    pub fn read_raw_all(&mut self) -> Result<[u16; NUM_FINGERS], MUX::Error> {
        let mut out = [0u16; NUM_FINGERS];
        for (channel, slot) in out.iter_mut().enumerate() {
            *slot = self.read_raw(channel as u8)?;
        }
        Ok(out)
    }

    /// Normalized flexion of every finger, in finger order.
    pub fn read_channels(&mut self) -> Result<[u8; NUM_FINGERS], MUX::Error> {
        let raw = self.read_raw_all()?;

        let mut out = [0u8; NUM_FINGERS];
        for ((slot, raw), cal) in out.iter_mut().zip(raw).zip(self.config.calibration) {
            *slot = cal.normalize(raw, self.config.output_max);
        }
        Ok(out)
    }

    pub fn free(self) -> (MUX, ADC, D) {
        (self.mux, self.adc, self.delay)
    }
}
