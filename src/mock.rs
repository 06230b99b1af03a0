// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side stand-ins for the board peripherals, used by the unit tests.
//!
//! Every mock is a cheap handle onto shared state so a test can keep a clone and inspect what the
//! code under test did with the one it was given.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::blocking::i2c::{Write, WriteRead};
use embedded_hal::digital::v2::OutputPin;

use crate::hw::SampleSource;
use crate::node::FrameSink;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MockError;

/// GPIO output that remembers its level and can be told to fail.
#[derive(Clone, Default)]
pub struct MockPin {
    high: Rc<Cell<bool>>,
    fail: Rc<Cell<bool>>,
    toggles: Rc<Cell<usize>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    /// Number of level writes so far.
    pub fn writes(&self) -> usize {
        self.toggles.get()
    }

    pub fn fail_next(&self) {
        self.fail.set(true);
    }

    fn set(&mut self, high: bool) -> Result<(), MockError> {
        if self.fail.replace(false) {
            return Err(MockError);
        }
        self.high.set(high);
        self.toggles.set(self.toggles.get() + 1);
        Ok(())
    }
}

impl OutputPin for MockPin {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), MockError> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        self.set(true)
    }
}

/// ADC behind a mux: returns the scripted raw value for whichever channel the select pins encode.
pub struct ScriptedAdc {
    pins: [MockPin; 3],
    raw: [u16; 8],
    reads: Rc<RefCell<Vec<u8>>>,
}

impl ScriptedAdc {
    pub fn new(pins: [MockPin; 3], raw: [u16; 8]) -> Self {
        Self {
            pins,
            raw,
            reads: Rc::default(),
        }
    }

    /// Channels sampled so far, in order.
    pub fn reads(&self) -> Rc<RefCell<Vec<u8>>> {
        self.reads.clone()
    }
}

impl SampleSource for ScriptedAdc {
    fn read_sample(&mut self) -> u16 {
        let ch = self
            .pins
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, pin)| acc | ((pin.is_high() as u8) << bit));
        self.reads.borrow_mut().push(ch);
        self.raw[ch as usize]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delay {
    Us(u32),
    Ms(u32),
}

/// Delay provider that records instead of sleeping.
#[derive(Clone, Default)]
pub struct MockDelay {
    log: Rc<RefCell<Vec<Delay>>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Vec<Delay> {
        self.log.borrow().clone()
    }
}

impl DelayUs<u32> for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Delay::Us(us));
    }
}

impl DelayMs<u8> for MockDelay {
    fn delay_ms(&mut self, ms: u8) {
        self.log.borrow_mut().push(Delay::Ms(ms as u32));
    }
}

/// One bus transaction seen by [`MockI2c`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Write { addr: u8, bytes: Vec<u8> },
    WriteRead { addr: u8, bytes: Vec<u8>, len: usize },
}

#[derive(Default)]
struct I2cState {
    ops: Vec<Op>,
    /// Byte returned by every read.
    read_value: u8,
    /// Fail the transaction with this index (0-based, counting every attempt).
    fail_at: Option<usize>,
    fail_all: bool,
    attempts: usize,
}

/// Recording I²C bus.
#[derive(Clone, Default)]
pub struct MockI2c {
    state: Rc<RefCell<I2cState>>,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus with nothing attached: every transaction NAKs.
    pub fn absent() -> Self {
        let bus = Self::new();
        bus.state.borrow_mut().fail_all = true;
        bus
    }

    pub fn set_read_value(&self, value: u8) {
        self.state.borrow_mut().read_value = value;
    }

    pub fn fail_at(&self, attempt: usize) {
        self.state.borrow_mut().fail_at = Some(attempt);
    }

    pub fn set_fail_all(&self, fail: bool) {
        self.state.borrow_mut().fail_all = fail;
    }

    /// Successful transactions so far.
    pub fn ops(&self) -> Vec<Op> {
        self.state.borrow().ops.clone()
    }

    /// Payloads of successful plain writes.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Write { bytes, .. } => Some(bytes),
                Op::WriteRead { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.state.borrow_mut().ops.clear();
    }

    fn attempt(&self, op: Op) -> Result<(), MockError> {
        let mut state = self.state.borrow_mut();
        let n = state.attempts;
        state.attempts += 1;
        if state.fail_all || state.fail_at == Some(n) {
            return Err(MockError);
        }
        state.ops.push(op);
        Ok(())
    }
}

impl Write for MockI2c {
    type Error = MockError;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), MockError> {
        self.attempt(Op::Write {
            addr,
            bytes: bytes.to_vec(),
        })
    }
}

impl WriteRead for MockI2c {
    type Error = MockError;

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), MockError> {
        self.attempt(Op::WriteRead {
            addr,
            bytes: bytes.to_vec(),
            len: buffer.len(),
        })?;
        let value = self.state.borrow().read_value;
        buffer.fill(value);
        Ok(())
    }
}

/// Transport that records every datagram.
#[derive(Clone, Default)]
pub struct MockLink {
    sent: Rc<RefCell<Vec<Vec<u8>>>>,
    fail: Rc<Cell<bool>>,
}

impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.borrow().clone()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl FrameSink for MockLink {
    type Error = MockError;

    fn send(&mut self, bytes: &[u8]) -> Result<(), MockError> {
        if self.fail.get() {
            return Err(MockError);
        }
        self.sent.borrow_mut().push(bytes.to_vec());
        Ok(())
    }
}
