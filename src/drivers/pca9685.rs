// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! NXP PCA9685 16-channel, 12-bit PWM controller (I²C) used as a servo driver.
//!
//! The driver is split into two type states:
//!
//! - [`Init`]: reset and frequency configuration. Changing the prescaler needs the oscillator in
//!   SLEEP and a 5 ms restart delay, so only this state accepts a delay provider.
//! - [`Running`]: pulse writes only. Every write is a single short I²C burst, safe to call from a
//!   polling loop.
//!
//! ```ignore
//! let mut pca = Pca9685::new(i2c, config::PCA9685_ADDR);
//! if pca.init(config::SERVO_FREQ_HZ, &mut delay).is_err() {
//!     // device stays offline, pulse writes become no-ops
//! }
//! let mut pca = pca.into_running();
//! pca.set_pulse_us(0, 1500.0)?;
//! ```
//!
//! The bus is never retried. A failed write leaves that channel's recorded state untouched.

use core::fmt;
use core::marker::PhantomData;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};
#[allow(unused_imports)]
use micromath::F32Ext;

// Register addresses
pub mod reg {
    pub const MODE1: u8 = 0x00;
    pub const MODE2: u8 = 0x01;
    pub const LED0_ON_L: u8 = 0x06;
    pub const PRE_SCALE: u8 = 0xFE;
}

// MODE1 bits
pub const MODE1_ALLCALL: u8 = 1 << 0;
pub const MODE1_SLEEP: u8 = 1 << 4;
pub const MODE1_AI: u8 = 1 << 5;
pub const MODE1_RESTART: u8 = 1 << 7;

// MODE2 bits
pub const MODE2_OUTDRV: u8 = 1 << 2;

/// Internal oscillator frequency.
pub const OSC_HZ: f32 = 25_000_000.0;

/// Number of PWM outputs.
pub const CHANNELS: u8 = 16;

/// Counts per PWM period.
pub const RESOLUTION: f32 = 4096.0;

/// Largest off count.
pub const MAX_COUNT: u16 = 4095;

// Hardware prescaler limits
pub const PRESCALE_MIN: u8 = 3;
pub const PRESCALE_MAX: u8 = 255;

/// Pulse widths accepted by [`Pca9685::set_pulse_us`]; anything outside is clamped.
pub const PULSE_LIMIT_MIN_US: f32 = 400.0;
pub const PULSE_LIMIT_MAX_US: f32 = 2600.0;

/// Oscillator restart time after leaving SLEEP. Fixed by the datasheet (500 µs minimum), padded.
const OSC_STARTUP_MS: u8 = 5;

/// MODE1 register contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mode1 {
    raw: u8,
}

impl Mode1 {
    #[inline]
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Restart pending after SLEEP with outputs previously active.
    #[inline]
    pub fn restart(&self) -> bool {
        (self.raw & MODE1_RESTART) != 0
    }

    /// Register auto-increment enabled.
    #[inline]
    pub fn auto_increment(&self) -> bool {
        (self.raw & MODE1_AI) != 0
    }

    /// Oscillator off, outputs undefined.
    #[inline]
    pub fn sleep(&self) -> bool {
        (self.raw & MODE1_SLEEP) != 0
    }

    /// Same mode, oscillator off and auto-increment off. The prescaler is writable in this mode.
    #[inline]
    fn asleep(self) -> u8 {
        (self.raw & !MODE1_AI) | MODE1_SLEEP
    }

    /// Same mode, oscillator running.
    #[inline]
    fn awake(self) -> u8 {
        self.raw & !MODE1_SLEEP
    }
}

/// Error type for `Pca9685` operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Bus transaction failed (NAK, arbitration loss, timeout).
    I2c(E),
    /// Channel index beyond 15. Nothing was sent.
    InvalidChannel(u8),
    /// Frequency not positive and finite.
    InvalidFrequency,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "i2c error: {:?}", e),
            Error::InvalidChannel(ch) => write!(f, "invalid PWM channel {}", ch),
            Error::InvalidFrequency => f.write_str("invalid PWM frequency"),
        }
    }
}

/// Outcome of a pulse write that did not fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PulseWrite {
    /// Off count sent to the device.
    Applied(u16),
    /// Device is offline; nothing was sent.
    Skipped,
}

/// Type state: configuring.
pub struct Init;

/// Type state: frequency locked, pulse writes allowed.
pub struct Running;

/// Prescaler value for a PWM frequency: `round(OSC / (4096 * hz)) - 1`, clamped to `[3, 255]`.
pub fn calc_prescale(freq_hz: f32) -> u8 {
    if !(freq_hz > 0.0) || !freq_hz.is_finite() {
        return PRESCALE_MAX;
    }

    let prescale = (OSC_HZ / (RESOLUTION * freq_hz)).round() - 1.0;

    if prescale < PRESCALE_MIN as f32 {
        PRESCALE_MIN
    } else if prescale > PRESCALE_MAX as f32 {
        PRESCALE_MAX
    } else {
        prescale as u8
    }
}

/// Off count for a pulse width at a PWM frequency. `us` is taken as-is; clamp it first.
pub fn pulse_to_count(us: f32, freq_hz: f32) -> u16 {
    let period_us = 1_000_000.0 / freq_hz;
    let counts = (us / period_us) * RESOLUTION;

    if !(counts > 0.0) {
        return 0;
    }
    let counts = counts.round();
    if counts > MAX_COUNT as f32 {
        MAX_COUNT
    } else {
        counts as u16
    }
}

/// PCA9685 on an I²C bus.
///
/// Owns the bus, so it is the only writer. `freq_hz` is `None` until the prescaler has been
/// programmed successfully; a device that never got there is offline.
pub struct Pca9685<I2C, MODE> {
    i2c: I2C,
    address: u8,
    freq_hz: Option<f32>,
    channels: [Option<u16>; CHANNELS as usize],
    _mode: PhantomData<MODE>,
}

impl<I2C, MODE> Pca9685<I2C, MODE> {
    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Programmed PWM frequency, `None` while unconfigured or offline.
    #[inline]
    pub fn frequency(&self) -> Option<f32> {
        self.freq_hz
    }

    #[inline]
    pub fn is_online(&self) -> bool {
        self.freq_hz.is_some()
    }

    /// Last off count successfully written to `channel`.
    pub fn channel_state(&self, channel: u8) -> Option<u16> {
        self.channels.get(channel as usize).copied().flatten()
    }

    /// Release the I²C bus.
    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Pca9685<I2C, Init>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Construct an unconfigured driver. Does not touch the bus.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            freq_hz: None,
            channels: [None; CHANNELS as usize],
            _mode: PhantomData,
        }
    }

    /// Software reset of the mode registers: MODE1 cleared, MODE2 totem-pole outputs.
    pub fn reset(&mut self) -> Result<(), Error<E>> {
        self.write_reg(reg::MODE1, 0x00)?;
        self.write_reg(reg::MODE2, MODE2_OUTDRV)?;
        Ok(())
    }

    /// Read MODE1.
    pub fn read_mode1(&mut self) -> Result<Mode1, Error<E>> {
        Ok(Mode1 {
            raw: self.read_reg(reg::MODE1)?,
        })
    }

    /// Program the PWM frequency. Returns the prescaler written.
    ///
    /// Sequence: MODE1 → SLEEP, PRE_SCALE, MODE1 → awake, oscillator restart delay, MODE1 → awake
    /// with auto-increment (needed by the 5-byte pulse bursts). The first failing step aborts and
    /// leaves the device unconfigured.
    pub fn set_frequency<D>(&mut self, freq_hz: f32, delay: &mut D) -> Result<u8, Error<E>>
    where
        D: DelayMs<u8>,
    {
        if !(freq_hz > 0.0) || !freq_hz.is_finite() {
            return Err(Error::InvalidFrequency);
        }

        self.freq_hz = None;

        let old = self.read_mode1()?;
        self.write_reg(reg::MODE1, old.asleep())?;

        let prescale = calc_prescale(freq_hz);
        self.write_reg(reg::PRE_SCALE, prescale)?;

        self.write_reg(reg::MODE1, old.awake())?;
        delay.delay_ms(OSC_STARTUP_MS);
        self.write_reg(reg::MODE1, old.awake() | MODE1_AI)?;

        self.freq_hz = Some(freq_hz);
        Ok(prescale)
    }

    /// Reset, then program the PWM frequency.
    pub fn init<D>(&mut self, freq_hz: f32, delay: &mut D) -> Result<u8, Error<E>>
    where
        D: DelayMs<u8>,
    {
        self.reset()?;
        self.set_frequency(freq_hz, delay)
    }

    /// Lock the configuration. If the frequency was never programmed the device stays offline.
    pub fn into_running(self) -> Pca9685<I2C, Running> {
        Pca9685 {
            i2c: self.i2c,
            address: self.address,
            freq_hz: self.freq_hz,
            channels: self.channels,
            _mode: PhantomData,
        }
    }
}

impl<I2C, E> Pca9685<I2C, Running>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Set a servo pulse width in microseconds.
    ///
    /// `us` is clamped to 400–2600 µs. An offline device returns [`PulseWrite::Skipped`] without
    /// touching the bus.
    pub fn set_pulse_us(&mut self, channel: u8, us: f32) -> Result<PulseWrite, Error<E>> {
        if channel >= CHANNELS {
            return Err(Error::InvalidChannel(channel));
        }
        let freq_hz = match self.freq_hz {
            Some(hz) => hz,
            None => return Ok(PulseWrite::Skipped),
        };

        let us = if us.is_nan() {
            PULSE_LIMIT_MIN_US
        } else {
            us.max(PULSE_LIMIT_MIN_US).min(PULSE_LIMIT_MAX_US)
        };

        let off = pulse_to_count(us, freq_hz);
        self.set_pwm_raw(channel, 0, off)
    }

    /// Write raw on/off counts (0–4095) to a channel.
    pub fn set_pwm_raw(&mut self, channel: u8, on: u16, off: u16) -> Result<PulseWrite, Error<E>> {
        if channel >= CHANNELS {
            return Err(Error::InvalidChannel(channel));
        }
        if self.freq_hz.is_none() {
            return Ok(PulseWrite::Skipped);
        }

        let on = on.min(MAX_COUNT);
        let off = off.min(MAX_COUNT);
        let [on_lo, on_hi] = on.to_le_bytes();
        let [off_lo, off_hi] = off.to_le_bytes();
        let buf = [reg::LED0_ON_L + 4 * channel, on_lo, on_hi, off_lo, off_hi];

        self.i2c.write(self.address, &buf).map_err(Error::I2c)?;

        self.channels[channel as usize] = Some(off);
        Ok(PulseWrite::Applied(off))
    }
}

impl<I2C, E, MODE> Pca9685<I2C, MODE>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(Error::I2c)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }
}
