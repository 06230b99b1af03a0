// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 8:1 analog multiplexer (CD4051-style) driven by three select lines.

use embedded_hal::digital::v2::{OutputPin, PinState};

use crate::hw::ChannelSelect;

/// Mux with select lines A (bit 0), B (bit 1) and C (bit 2).
pub struct AnalogMux<A, B, C> {
    a: A,
    b: B,
    c: C,
    selected: Option<u8>,
}

impl<A, B, C, E> AnalogMux<A, B, C>
where
    A: OutputPin<Error = E>,
    B: OutputPin<Error = E>,
    C: OutputPin<Error = E>,
{
    pub const CHANNELS: u8 = 8;

    pub fn new(a: A, b: B, c: C) -> Self {
        Self {
            a,
            b,
            c,
            selected: None,
        }
    }

    /// Last successfully selected channel.
    #[inline]
    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    pub fn free(self) -> (A, B, C) {
        (self.a, self.b, self.c)
    }
}

impl<A, B, C, E> ChannelSelect for AnalogMux<A, B, C>
where
    A: OutputPin<Error = E>,
    B: OutputPin<Error = E>,
    C: OutputPin<Error = E>,
{
    type Error = E;

    /// Drive the select lines with the low three bits of `channel`.
    fn select_channel(&mut self, channel: u8) -> Result<(), E> {
        let channel = channel & 0b111;
        self.selected = None;

        self.a.set_state(PinState::from(channel & 0b001 != 0))?;
        self.b.set_state(PinState::from(channel & 0b010 != 0))?;
        self.c.set_state(PinState::from(channel & 0b100 != 0))?;

        self.selected = Some(channel);
        Ok(())
    }
}
