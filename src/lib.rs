// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # RoboHand Firmware
//!
//! This crate contains the firmware components for a glove-controlled robotic hand, written in
//! Rust. A glove samples five Hall-effect flex sensors through an analog multiplexer and streams
//! compact text frames to the hand, which maps each finger value to a servo pulse on a PCA9685
//! PWM controller.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Canonical constants shared by the glove and the hand |
//! | [`hw`] | Hardware seams (mux select lines, analog samples) and STM32F7 board adapters |
//! | [`drivers`] | Device-level drivers (PCA9685, Hall glove acquisition) |
//! | [`control`] | Value mapping and interrupt-to-loop signalling |
//! | [`protocol`] | The `H,...` wire frame: encoder, tokenizer, validator |
//! | [`node`] | The two endpoints: [`node::Glove`] and [`node::Hand`] |
//!
//! ## Getting Started
//!
//! Run the host-side tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash a board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf --bin hand
//! cargo run --release --features board --target thumbv7em-none-eabihf --bin glove
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod drivers;
pub mod hw;
pub mod node;
pub mod protocol;

#[cfg(test)]
mod mock;
