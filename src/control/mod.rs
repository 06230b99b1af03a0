// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Logic
//!
//! Building blocks shared by the glove and hand loops.
//!
//! ## Modules
//!
//! - [`mapping`] - Sensor count → finger value → servo pulse width mapping.
//! - [`flag`] - Interrupt-to-loop event flag.

pub mod flag;
pub mod mapping;

pub use flag::EventFlag;
pub use mapping::{map_sensor, value_to_pulse, MappingConfig};
