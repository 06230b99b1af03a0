// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! Seams between the drivers and the MCU. The traits here are all the acquisition driver needs,
//! which keeps it testable on the host. STM32F7 implementations live behind the `board` feature.

pub mod mux;

#[cfg(feature = "board")]
pub mod adc;
#[cfg(feature = "board")]
pub mod pins;
#[cfg(feature = "board")]
pub mod tick;
#[cfg(feature = "board")]
pub mod usart;

pub use mux::AnalogMux;

#[cfg(feature = "board")]
pub use adc::{Adc, AdcInput};
#[cfg(feature = "board")]
pub use usart::Usart;

/// Routes one of several analog lines onto the shared ADC input.
pub trait ChannelSelect {
    type Error;

    fn select_channel(&mut self, channel: u8) -> Result<(), Self::Error>;
}

/// A single-ended analog input returning raw 12-bit counts.
pub trait SampleSource {
    fn read_sample(&mut self) -> u16;
}
