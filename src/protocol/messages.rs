// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Finger position frame exchanged between the glove and the hand.
//!
//! One frame per datagram (or per line on a serial link), ASCII:
//!
//! ```text
//! H,<v0>,<v1>,<v2>,<v3>,<v4>
//! H,<seq>,<v0>,<v1>,<v2>,<v3>,<v4>
//! ```
//!
//! `seq` is an optional wrapping 0–255 counter, diagnostic only. Values are decimal finger
//! positions in `[0, VMAX]`; the receiver clamps anything outside that range.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::{MAX_FRAME_LEN, NUM_FINGERS};

/// Header token of every frame.
pub const HEADER: &str = "H";

/// Encoder delimiter. The decoder also accepts spaces.
pub const DELIMITER: char = ',';

/// Token count of a frame without a sequence number.
pub const TOKENS_NO_SEQ: usize = 1 + NUM_FINGERS;

/// Token count of a frame with a sequence number.
pub const TOKENS_WITH_SEQ: usize = 2 + NUM_FINGERS;

/// Encoded frame text.
pub type FrameBuf = String<MAX_FRAME_LEN>;

/// A validated finger position frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub seq: Option<u8>,
    pub values: [u8; NUM_FINGERS],
}

impl Frame {
    pub fn new(values: [u8; NUM_FINGERS]) -> Self {
        Self { seq: None, values }
    }

    pub fn with_seq(seq: u8, values: [u8; NUM_FINGERS]) -> Self {
        Self {
            seq: Some(seq),
            values,
        }
    }

    /// Encode as `H[,seq],v0,...,v4`.
    pub fn encode(&self) -> FrameBuf {
        encode(self.seq, &self.values)
    }
}

/// Build the wire text for a frame.
pub fn encode(seq: Option<u8>, values: &[u8; NUM_FINGERS]) -> FrameBuf {
    let mut out = FrameBuf::new();

    // Longest frame is "H,255" plus five ",255", well under MAX_FRAME_LEN.
    let _ = out.push_str(HEADER);
    if let Some(seq) = seq {
        let _ = write!(out, "{}{}", DELIMITER, seq);
    }
    for v in values {
        let _ = write!(out, "{}{}", DELIMITER, v);
    }

    out
}

/// Reasons a received frame is rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Nothing but delimiters or whitespace.
    Empty,
    /// Datagram longer than the receive buffer.
    TooLong(usize),
    /// Payload is not valid UTF-8.
    NotUtf8,
    /// First token is not [`HEADER`].
    BadHeader,
    /// Token count matches neither layout.
    TokenCount(usize),
    /// Token at `index` is not a base-10 integer.
    InvalidNumber { index: usize },
    /// Sequence number outside 0–255.
    SequenceOutOfRange(i64),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Empty => f.write_str("empty frame"),
            FrameError::TooLong(len) => write!(f, "frame too long ({} bytes)", len),
            FrameError::NotUtf8 => f.write_str("frame is not text"),
            FrameError::BadHeader => f.write_str("missing 'H' header"),
            FrameError::TokenCount(n) => write!(
                f,
                "expected {} or {} tokens, got {}",
                TOKENS_NO_SEQ, TOKENS_WITH_SEQ, n
            ),
            FrameError::InvalidNumber { index } => write!(f, "token {} is not a number", index),
            FrameError::SequenceOutOfRange(seq) => write!(f, "sequence {} out of range", seq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_without_sequence() {
        assert_eq!(encode(None, &[0, 9, 4, 0, 9]).as_str(), "H,0,9,4,0,9");
    }

    #[test]
    fn encode_with_sequence() {
        assert_eq!(
            Frame::with_seq(3, [0, 1, 2, 3, 4]).encode().as_str(),
            "H,3,0,1,2,3,4"
        );
    }

    #[test]
    fn longest_frame_fits() {
        let frame = encode(Some(255), &[255; NUM_FINGERS]);
        assert_eq!(frame.as_str(), "H,255,255,255,255,255,255");
    }
}
