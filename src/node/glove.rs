// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Glove side: acquire, encode, send.

use embedded_hal::blocking::delay::DelayUs;

use crate::drivers::hall_glove::HallGlove;
use crate::hw::{ChannelSelect, SampleSource};
use crate::node::{FrameSink, GloveError};
use crate::protocol::Frame;

pub struct Glove<MUX, ADC, D> {
    sensors: HallGlove<MUX, ADC, D>,
    /// Sequence number of the next frame.
    seq: u8,
    sequenced: bool,
}

impl<MUX, ADC, D> Glove<MUX, ADC, D>
where
    MUX: ChannelSelect,
    ADC: SampleSource,
    D: DelayUs<u32>,
{
    /// Glove sending plain `H,v0,...,v4` frames.
    pub fn new(sensors: HallGlove<MUX, ADC, D>) -> Self {
        Self {
            sensors,
            seq: 0,
            sequenced: false,
        }
    }

    /// Attach a wrapping sequence number (`H,seq,v0,...,v4`) to every frame.
    pub fn with_sequence(mut self, enabled: bool) -> Self {
        self.sequenced = enabled;
        self
    }

    #[inline]
    pub fn sensors(&mut self) -> &mut HallGlove<MUX, ADC, D> {
        &mut self.sensors
    }

    /// Sequence number the next frame will carry.
    #[inline]
    pub fn next_seq(&self) -> u8 {
        self.seq
    }

    /// Read the sensors and build a frame.
    ///
    /// The sequence number advances for every frame built, sent or not, so the receiver sees lost
    /// frames as gaps.
    pub fn sample(&mut self) -> Result<Frame, MUX::Error> {
        let values = self.sensors.read_channels()?;

        if !self.sequenced {
            return Ok(Frame::new(values));
        }

        let frame = Frame::with_seq(self.seq, values);
        self.seq = self.seq.wrapping_add(1);
        Ok(frame)
    }

    /// One cycle: sample, encode and push the frame out.
    pub fn step<S>(&mut self, link: &mut S) -> Result<Frame, GloveError<MUX::Error, S::Error>>
    where
        S: FrameSink,
    {
        let frame = self.sample().map_err(GloveError::Sensor)?;
        let text = frame.encode();

        link.send(text.as_bytes()).map_err(GloveError::Link)?;
        trace!("sent {}", text.as_str());

        Ok(frame)
    }

    pub fn free(self) -> HallGlove<MUX, ADC, D> {
        self.sensors
    }
}
