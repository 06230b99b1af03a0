// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hand firmware: receive frames on USART1 and drive the finger servos through the PCA9685.

#![no_main]
#![no_std]

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
#[cfg(feature = "defmt-rtt")]
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    i2c::{BlockingI2c, Mode},
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use robohand::config;
use robohand::control::MappingConfig;
use robohand::drivers::Pca9685;
use robohand::hw::pins::HandPins;
use robohand::hw::Usart;
use robohand::node::Hand;
use robohand::protocol::Parser;

/// I²C data phase timeout.
const I2C_TIMEOUT_US: u32 = 10_000;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = HandPins::new(dp.GPIOA, dp.GPIOB);
    let mut delay = Delay::new(cp.SYST, clocks.sysclk().raw());

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

    // I2C1 → PCA9685
    let i2c = BlockingI2c::i2c1(
        dp.I2C1,
        (pins.i2c1.scl, pins.i2c1.sda),
        Mode::standard(100.kHz()),
        &clocks,
        &mut rcc.apb1,
        I2C_TIMEOUT_US,
    );

    // A missing controller leaves the hand offline but still listening.
    let mut pca = Pca9685::new(i2c, config::PCA9685_ADDR);
    if let Err(_e) = pca.init(config::SERVO_FREQ_HZ, &mut delay) {
        #[cfg(feature = "defmt")]
        defmt::error!("PCA9685 init failed: {}", defmt::Debug2Format(&_e));
    }
    let mut hand = Hand::new(pca.into_running(), MappingConfig::default());

    if hand.is_online() {
        let _ = hand.home();
    }

    let mut parser = Parser::new();

    loop {
        while let Some(b) = link.poll_byte() {
            if let Some(parsed) = parser.push(b) {
                // Rejections and write failures are logged by the hand; the next frame retries.
                let _ = hand.on_parsed(parsed);
            }
        }
    }
}
