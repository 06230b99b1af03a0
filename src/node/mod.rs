// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Endpoints
//!
//! The two ends of the link.
//!
//! - [`Glove`] – sample the sensors, encode a frame, hand it to a [`FrameSink`].
//! - [`Hand`] – take received bytes, decode, map each value to a pulse, drive the PCA9685.
//!
//! Neither side owns the transport. The glove pushes through [`FrameSink`]; the hand is fed one
//! datagram (or line) at a time.

use core::fmt;

use crate::drivers::pca9685;
use crate::protocol::FrameError;

pub mod glove;
pub mod hand;

pub use glove::Glove;
pub use hand::Hand;

/// Outbound half of the link. One call is one frame; the transport adds any terminator.
pub trait FrameSink {
    type Error;

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Errors reported by [`Hand`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HandError<E> {
    /// Frame rejected. No servo was touched.
    Frame(FrameError),
    /// A servo write failed. Channels before it were updated.
    Servo(pca9685::Error<E>),
}

impl<E> From<FrameError> for HandError<E> {
    fn from(e: FrameError) -> Self {
        HandError::Frame(e)
    }
}

impl<E> From<pca9685::Error<E>> for HandError<E> {
    fn from(e: pca9685::Error<E>) -> Self {
        HandError::Servo(e)
    }
}

impl<E: fmt::Debug> fmt::Display for HandError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::Frame(e) => write!(f, "rejected frame: {}", e),
            HandError::Servo(e) => write!(f, "servo write failed: {}", e),
        }
    }
}

/// Errors reported by [`Glove`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GloveError<S, T> {
    /// Mux select failed; no frame was built.
    Sensor(S),
    /// Frame built but the transport refused it.
    Link(T),
}

impl<S: fmt::Debug, T: fmt::Debug> fmt::Display for GloveError<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GloveError::Sensor(e) => write!(f, "sensor read failed: {:?}", e),
            GloveError::Link(e) => write!(f, "send failed: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::hall_glove::{AcquisitionConfig, HallGlove};
    use crate::drivers::pca9685::{Pca9685, Running};
    use crate::hw::AnalogMux;
    use crate::mock::{MockDelay, MockI2c, MockLink, MockPin, ScriptedAdc};
    use std::vec::Vec;

    fn hand(bus: &MockI2c) -> Hand<MockI2c> {
        let mut pca = Pca9685::new(bus.clone(), 0x40);
        pca.init(50.0, &mut MockDelay::new()).unwrap();
        bus.clear();
        let pca: Pca9685<MockI2c, Running> = pca.into_running();
        Hand::new(pca, Default::default())
    }

    #[test]
    fn glove_to_hand() {
        let pins = [MockPin::new(), MockPin::new(), MockPin::new()];
        let mux = AnalogMux::new(pins[0].clone(), pins[1].clone(), pins[2].clone());
        let adc = ScriptedAdc::new(pins, [1200, 3350, 2275, 1200, 3350, 0, 0, 0]);
        let sensors = HallGlove::new(mux, adc, MockDelay::new(), AcquisitionConfig::default());
        let mut glove = Glove::new(sensors);

        let mut link = MockLink::new();
        glove.step(&mut link).unwrap();

        let sent = link.sent();
        assert_eq!(sent, [b"H,0,9,4,0,9".to_vec()]);

        let bus = MockI2c::new();
        let mut hand = hand(&bus);
        let frame = hand.on_receive(&sent[0]).unwrap();
        assert_eq!(frame.values, [0, 9, 4, 0, 9]);

        let expected: Vec<Vec<u8>> = [
            [0x06, 0, 0, 0xC3, 0x01],
            [0x0A, 0, 0, 0xA4, 0x00],
            [0x0E, 0, 0, 0x71, 0x01],
            [0x12, 0, 0, 0xC3, 0x01],
            [0x16, 0, 0, 0xC3, 0x01],
        ]
        .iter()
        .map(|b| b.to_vec())
        .collect();
        assert_eq!(bus.writes(), expected);
    }

    #[test]
    fn error_display() {
        let e: HandError<()> = FrameError::BadHeader.into();
        assert_eq!(std::format!("{}", e), "rejected frame: missing 'H' header");

        let e: HandError<()> = pca9685::Error::InvalidChannel(16).into();
        assert_eq!(
            std::format!("{}", e),
            "servo write failed: invalid PWM channel 16"
        );

        let e: GloveError<(), u8> = GloveError::Link(3);
        assert_eq!(std::format!("{}", e), "send failed: 3");
    }
}
