// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic.
//!
//! ## Existing drivers
//!
//! - [`pca9685`] – NXP PCA9685 16-channel 12-bit PWM controller over I²C
//! - [`hall_glove`] – Five Hall-effect flex sensors behind an 8:1 analog mux

pub mod hall_glove;
pub mod pca9685;

pub use hall_glove::{AcquisitionConfig, Calibration, HallGlove};
pub use pca9685::Pca9685;
