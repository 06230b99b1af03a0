// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic tick on TIM6 (basic timer) for pacing the glove sample loop.
//!
//! The timer counts at 10 kHz and raises its update interrupt once per period. The handler lives
//! in the binary; it only calls [`Tick::clear`] and raises an [`crate::control::EventFlag`].

use cortex_m::peripheral::NVIC;
use stm32f7xx_hal::pac;

/// Counter clock after prescaling.
const TICK_HZ: u32 = 10_000;

pub struct Tick {
    tim: pac::TIM6,
}

impl Tick {
    /// Configure TIM6 to interrupt every `period_ms` (1–6553 ms). `timclk_hz` is the APB1 timer
    /// clock.
    pub fn tim6(tim6: pac::TIM6, timclk_hz: u32, period_ms: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim6en().set_bit());

        let tim = tim6;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let psc = (timclk_hz / TICK_HZ).saturating_sub(1).min(0xFFFF);
        let arr = (period_ms * (TICK_HZ / 1000)).clamp(1, 0x1_0000) - 1;
        tim.psc.write(|w| unsafe { w.bits(psc) });
        tim.arr.write(|w| unsafe { w.bits(arr) });

        // Latch PSC/ARR without firing an interrupt
        tim.cr1.modify(|_, w| w.urs().set_bit());
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        tim.dier.modify(|_, w| w.uie().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        unsafe { NVIC::unmask(pac::Interrupt::TIM6_DAC) };

        Self { tim }
    }

    /// Acknowledge the update interrupt. Call from the ISR.
    #[inline]
    pub fn clear() {
        let tim = unsafe { &*pac::TIM6::ptr() };
        tim.sr.modify(|_, w| w.uif().clear_bit());
    }

    #[inline]
    pub fn free(self) -> pac::TIM6 {
        self.tim
    }
}
