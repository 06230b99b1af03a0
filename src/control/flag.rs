// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Edge-triggered event flag shared between an interrupt handler and the main loop.
//!
//! The interrupt only calls [`EventFlag::raise`]. The loop calls [`EventFlag::take`], which clears
//! the flag before returning `true`, so the work that follows can never be entered twice for the
//! same event. Raises that happen while the loop is busy coalesce into one.
//!
//! ```
//! use robohand::control::EventFlag;
//!
//! static SAMPLE_DUE: EventFlag = EventFlag::new();
//!
//! // timer interrupt
//! SAMPLE_DUE.raise();
//!
//! // main loop
//! if SAMPLE_DUE.take() {
//!     // sample and send
//! }
//! assert!(!SAMPLE_DUE.take());
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

pub struct EventFlag {
    raised: AtomicBool,
}

impl EventFlag {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Signal the event. Safe to call from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Consume a pending event, clearing the flag.
    #[inline]
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    /// Check for a pending event without consuming it.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl Default for EventFlag {
    fn default() -> Self {
        Self::new()
    }
}
