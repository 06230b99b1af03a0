// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod messages;
pub mod parser;

pub use messages::{encode, Frame, FrameBuf, FrameError};
pub use parser::{decode, decode_bytes, decode_bytes_with_max, decode_with_max, Parser};
