// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hand side: decode, map, drive.
//!
//! Finger `i` is wired to PCA9685 channel `i`. A frame either passes validation and is applied to
//! all five servos, or it is dropped and nothing moves.
//!
//! An offline controller (initialization failed) still decodes and logs every frame so the link
//! stays observable; the pulse writes are skipped.

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::config::NUM_FINGERS;
use crate::control::MappingConfig;
use crate::drivers::pca9685::{Pca9685, PulseWrite, Running};
use crate::node::HandError;
use crate::protocol::{decode_bytes_with_max, decode_with_max, Frame, FrameError};

/// Every finger open.
pub const HOME: [u8; NUM_FINGERS] = [0; NUM_FINGERS];

pub struct Hand<I2C> {
    pca: Pca9685<I2C, Running>,
    mapping: MappingConfig,
    last: Option<[u8; NUM_FINGERS]>,
}

impl<I2C, E> Hand<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    pub fn new(pca: Pca9685<I2C, Running>, mapping: MappingConfig) -> Self {
        if !pca.is_online() {
            error!("PCA9685 at {=u8:#x} offline, servo writes disabled", pca.address());
        }

        Self {
            pca,
            mapping,
            last: None,
        }
    }

    #[inline]
    pub fn is_online(&self) -> bool {
        self.pca.is_online()
    }

    #[inline]
    pub fn mapping(&self) -> &MappingConfig {
        &self.mapping
    }

    #[inline]
    pub fn pca(&self) -> &Pca9685<I2C, Running> {
        &self.pca
    }

    /// Values of the last frame applied to the servos.
    #[inline]
    pub fn last_values(&self) -> Option<[u8; NUM_FINGERS]> {
        self.last
    }

    /// Handle one received datagram.
    pub fn on_receive(&mut self, payload: &[u8]) -> Result<Frame, HandError<E>> {
        let frame = decode_bytes_with_max(payload, self.mapping.vmax).map_err(rejected)?;
        self.apply_frame(&frame)?;
        Ok(frame)
    }

    /// Handle one received line of text.
    pub fn on_line(&mut self, line: &str) -> Result<Frame, HandError<E>> {
        let frame = decode_with_max(line, self.mapping.vmax).map_err(rejected)?;
        self.apply_frame(&frame)?;
        Ok(frame)
    }

    /// Handle the outcome of [`crate::protocol::Parser::push`].
    pub fn on_parsed(&mut self, parsed: Result<Frame, FrameError>) -> Result<Frame, HandError<E>> {
        let frame = parsed.map_err(rejected)?;
        self.apply_frame(&frame)?;
        Ok(frame)
    }

    pub fn apply_frame(&mut self, frame: &Frame) -> Result<(), HandError<E>> {
        if let Some(seq) = frame.seq {
            trace!("frame seq {=u8}", seq);
        }
        self.apply_values(&frame.values)
    }

    /// Drive every finger to `values`.
    ///
    /// All five channels are attempted even if one fails; the first failure is returned.
    pub fn apply_values(&mut self, values: &[u8; NUM_FINGERS]) -> Result<(), HandError<E>> {
        if !self.pca.is_online() {
            debug!("offline, not applying {}", values);
            return Ok(());
        }

        let mut first_err = None;
        for (ch, &v) in values.iter().enumerate() {
            let us = self.mapping.value_to_pulse(ch, v as i32);
            match self.pca.set_pulse_us(ch as u8, us) {
                Ok(PulseWrite::Applied(_)) | Ok(PulseWrite::Skipped) => {}
                Err(e) => {
                    warn!("servo {=usize} write failed", ch);
                    first_err.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_err {
            return Err(HandError::Servo(e));
        }

        debug!("applied {}", values);
        self.last = Some(*values);
        Ok(())
    }

    /// Open pose, sent once after a successful init.
    pub fn home(&mut self) -> Result<(), HandError<E>> {
        self.apply_values(&HOME)
    }

    pub fn free(self) -> Pca9685<I2C, Running> {
        self.pca
    }
}

fn rejected<E>(e: FrameError) -> HandError<E> {
    warn!("frame rejected: {}", e);
    HandError::Frame(e)
}
