// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Basic ADC support for STM32F7 using direct PAC register access.
//!
//! Thin wrapper around ADC1 with blocking single-channel reads. [`AdcInput`] pins the ADC to one
//! channel so it can serve as the [`SampleSource`] behind the glove mux.
//!
//! Example:
//! ```ignore
//! let adc1 = Adc::adc1(dp.ADC1);
//! let value = adc1.read(3);
//! ```

use stm32f7xx_hal::pac;

use crate::hw::SampleSource;

/// Generic ADC wrapper over a PAC ADCx peripheral.
pub struct Adc<ADC> {
    adc: ADC,
}

impl<ADC> Adc<ADC> {
    #[inline]
    pub fn free(self) -> ADC {
        self.adc
    }
}

impl Adc<pac::ADC1> {
    /// Create and initialize ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        // PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        // 12-bit, right-aligned, software trigger, single conversion
        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });
        adc1.sqr1.modify(|_, w| w.l().bits(0));

        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Read a single channel (0–15).
    pub fn read(&self, channel: u8) -> u16 {
        let adc = &self.adc;

        // Longest sample time (480 cycles). The mux output is high impedance.
        if channel <= 9 {
            adc.smpr2.modify(|_, w| match channel {
                0 => w.smp0().bits(0b111),
                1 => w.smp1().bits(0b111),
                2 => w.smp2().bits(0b111),
                3 => w.smp3().bits(0b111),
                4 => w.smp4().bits(0b111),
                5 => w.smp5().bits(0b111),
                6 => w.smp6().bits(0b111),
                7 => w.smp7().bits(0b111),
                8 => w.smp8().bits(0b111),
                _ => w.smp9().bits(0b111),
            });
        }

        adc.sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits()
    }

    /// Dedicate the ADC to one channel.
    pub fn into_input(self, channel: u8) -> AdcInput {
        AdcInput { adc: self, channel }
    }
}

/// ADC1 bound to a single channel.
pub struct AdcInput {
    adc: Adc<pac::ADC1>,
    channel: u8,
}

impl AdcInput {
    #[inline]
    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn free(self) -> Adc<pac::ADC1> {
        self.adc
    }
}

impl SampleSource for AdcInput {
    #[inline]
    fn read_sample(&mut self) -> u16 {
        self.adc.read(self.channel)
    }
}
