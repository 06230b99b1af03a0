// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Glove firmware: sample the five finger sensors every 250 ms and send a frame on USART1.

#![no_main]
#![no_std]

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
#[cfg(feature = "defmt-rtt")]
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use robohand::config;
use robohand::control::EventFlag;
use robohand::drivers::{AcquisitionConfig, HallGlove};
use robohand::hw::pins::{GlovePins, SENSOR_ADC_CHANNEL};
use robohand::hw::tick::Tick;
use robohand::hw::{Adc, AnalogMux, Usart};
use robohand::node::Glove;

static SAMPLE_DUE: EventFlag = EventFlag::new();

#[interrupt]
fn TIM6_DAC() {
    Tick::clear();
    SAMPLE_DUE.raise();
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = GlovePins::new(dp.GPIOA, dp.GPIOD);

    // USART1 (link)
    let usart_cfg = Config {
        baud_rate: config::LINK_BAUD.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    let mut link = Usart::new(serial);

    // Sensors
    let mux = AnalogMux::new(pins.mux.a, pins.mux.b, pins.mux.c);
    let adc = Adc::adc1(dp.ADC1).into_input(SENSOR_ADC_CHANNEL);
    let delay = Delay::new(cp.SYST, clocks.sysclk().raw());
    let sensors = HallGlove::new(mux, adc, delay, AcquisitionConfig::default());
    let mut glove = Glove::new(sensors).with_sequence(true);

    let _tick = Tick::tim6(dp.TIM6, clocks.timclk1().raw(), config::SAMPLE_PERIOD_MS);

    loop {
        if !SAMPLE_DUE.take() {
            cortex_m::asm::wfi();
            continue;
        }

        // Select lines cannot fail on this board and the USART blocks until sent.
        let _ = glove.step(&mut link);
    }
}
