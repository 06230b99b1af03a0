// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 glove and hand boards.
//!
//! Both boards share the link on USART1 (PA9/PA10). The glove adds the mux select lines and the
//! sensor ADC input; the hand adds I2C1 to the PCA9685.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpiod, Alternate, Analog, OpenDrain, Output, PushPull},
    pac,
    prelude::*,
};

/// ADC channel of the glove sensor input (PA3).
pub const SENSOR_ADC_CHANNEL: u8 = 3;

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// CD4051 select lines
pub struct MuxPins {
    pub a: gpiod::PD12<Output<PushPull>>,
    pub b: gpiod::PD13<Output<PushPull>>,
    pub c: gpiod::PD14<Output<PushPull>>,
}

/// I2C1 to the PCA9685 (external 4.7k pull-ups)
pub struct I2c1Pins {
    pub scl: gpiob::PB8<Alternate<4, OpenDrain>>,
    pub sda: gpiob::PB9<Alternate<4, OpenDrain>>,
}

/// Glove board. Construct this once at startup using:
///
/// ```ignore
/// let pins = GlovePins::new(dp.GPIOA, dp.GPIOD);
/// ```
pub struct GlovePins {
    pub usart1: Usart1Pins,
    pub mux: MuxPins,
    /// Mux COM, ADC123_IN3
    pub sensor: gpioa::PA3<Analog>,
}

impl GlovePins {
    pub fn new(gpioa: pac::GPIOA, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiod = gpiod.split();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            mux: MuxPins {
                a: gpiod.pd12.into_push_pull_output(),
                b: gpiod.pd13.into_push_pull_output(),
                c: gpiod.pd14.into_push_pull_output(),
            },

            sensor: gpioa.pa3.into_analog(),
        }
    }
}

/// Hand board.
///
/// ```ignore
/// let pins = HandPins::new(dp.GPIOA, dp.GPIOB);
/// ```
pub struct HandPins {
    pub usart1: Usart1Pins,
    pub i2c1: I2c1Pins,
}

impl HandPins {
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            i2c1: I2c1Pins {
                scl: gpiob.pb8.into_alternate_open_drain::<4>(),
                sda: gpiob.pb9.into_alternate_open_drain::<4>(),
            },
        }
    }
}
