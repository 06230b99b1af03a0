// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART link transport.
//!
//! Frames travel as text lines: the glove writes each frame followed by `\n`, the hand feeds every
//! received byte into a [`crate::protocol::Parser`].
//!
//! To watch the link from a host, tap the TX line with a USB-serial adapter and use
//! ```text
//! $ screen /dev/tty.usbserial* 115200
//! ```

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Instance, Pins, Rx, Serial, Tx},
};

use crate::node::FrameSink;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
    rx: Rx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, rx) = serial.split();
        Self { tx, rx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    /// Write string and LF terminator.
    #[inline]
    pub fn write_line(&mut self, s: &[u8]) {
        self.write_bytes(s);
        self.write_byte(b'\n');
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }

    /// Next received byte, if one is waiting.
    ///
    /// Framing, noise and overrun errors drop the byte. The line parser will reject whatever frame
    /// it landed in.
    pub fn poll_byte(&mut self) -> Option<u8> {
        match self.rx.read() {
            Ok(b) => Some(b),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(e)) => {
                warn!("usart rx error: {}", error_kind(&e));
                None
            }
        }
    }
}

#[inline]
fn error_kind(e: &serial::Error) -> &'static str {
    match e {
        serial::Error::Framing => "framing",
        serial::Error::Noise => "noise",
        serial::Error::Overrun => "overrun",
        serial::Error::Parity => "parity",
        _ => "other",
    }
}

impl<U: Instance> FrameSink for Usart<U> {
    type Error = core::convert::Infallible;

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.write_line(bytes);
        Ok(())
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}
