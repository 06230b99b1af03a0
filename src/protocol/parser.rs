// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Frame parser for the glove → hand protocol.
//!
//! [`decode`] validates a whole datagram. [`Parser`] assembles newline-terminated frames from a
//! byte stream (serial link) and hands each complete line to [`decode`].
//!
//! A frame is either accepted as a whole or rejected; nothing is partially applied.

use core::num::IntErrorKind;

use heapless::Vec;

use crate::config::{MAX_FRAME_LEN, NUM_FINGERS, VMAX};
use crate::protocol::messages::*;

/// Decode a frame, clamping values into `[0, VMAX]`.
#[inline]
pub fn decode(line: &str) -> Result<Frame, FrameError> {
    decode_with_max(line, VMAX)
}

/// Decode a frame, clamping values into `[0, vmax]`.
///
/// Tokens are separated by commas and/or spaces; runs of delimiters collapse. Out-of-range values
/// are not an error, they are clamped.
pub fn decode_with_max(line: &str, vmax: u8) -> Result<Frame, FrameError> {
    if line.len() > MAX_FRAME_LEN {
        return Err(FrameError::TooLong(line.len()));
    }

    let line = line.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0');

    let mut tokens: Vec<&str, TOKENS_WITH_SEQ> = Vec::new();
    let mut count = 0;
    for tok in line.split([',', ' ']).filter(|t| !t.is_empty()) {
        count += 1;
        // Keep counting past capacity so the error reports the real count.
        let _ = tokens.push(tok);
    }

    if count == 0 {
        return Err(FrameError::Empty);
    }
    if tokens[0] != HEADER {
        return Err(FrameError::BadHeader);
    }

    let (seq, first_value) = match count {
        TOKENS_NO_SEQ => (None, 1),
        TOKENS_WITH_SEQ => {
            let seq = parse_int(tokens[1], 1)?;
            if !(0..=255).contains(&seq) {
                return Err(FrameError::SequenceOutOfRange(seq));
            }
            (Some(seq as u8), 2)
        }
        n => return Err(FrameError::TokenCount(n)),
    };

    let mut values = [0u8; NUM_FINGERS];
    for (i, value) in values.iter_mut().enumerate() {
        let index = first_value + i;
        let v = parse_int(tokens[index], index)?;
        *value = v.clamp(0, vmax as i64) as u8;
    }

    Ok(Frame { seq, values })
}

/// Decode a raw datagram payload.
#[inline]
pub fn decode_bytes(payload: &[u8]) -> Result<Frame, FrameError> {
    decode_bytes_with_max(payload, VMAX)
}

/// [`decode_bytes`] with a custom value ceiling.
pub fn decode_bytes_with_max(payload: &[u8], vmax: u8) -> Result<Frame, FrameError> {
    if payload.len() > MAX_FRAME_LEN {
        return Err(FrameError::TooLong(payload.len()));
    }
    let line = core::str::from_utf8(payload).map_err(|_| FrameError::NotUtf8)?;
    decode_with_max(line, vmax)
}

/// Strict base-10 parse. Trailing characters fail; magnitudes beyond `i64` saturate.
fn parse_int(token: &str, index: usize) -> Result<i64, FrameError> {
    match token.parse::<i64>() {
        Ok(v) => Ok(v),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(FrameError::InvalidNumber { index }),
        },
    }
}

/// Streaming line parser.
///
/// Bytes accumulate until `\n`. A line that outgrows the buffer is dropped up to and including its
/// terminator and reported once as [`FrameError::TooLong`].
pub struct Parser {
    buf: Vec<u8, MAX_FRAME_LEN>,
    overflowed: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: 0,
        }
    }

    /// Process a single incoming byte. Returns `Some` once a complete line has been received.
    pub fn push(&mut self, byte: u8) -> Option<Result<Frame, FrameError>> {
        if byte == b'\n' {
            let result = if self.overflowed > 0 {
                Some(Err(FrameError::TooLong(self.overflowed)))
            } else if self.buf.iter().all(|b| b.is_ascii_whitespace()) {
                // Blank line, e.g. a keep-alive or a doubled terminator
                None
            } else {
                Some(decode_bytes(&self.buf))
            };
            self.reset();
            return result;
        }

        if self.overflowed > 0 {
            self.overflowed += 1;
        } else if self.buf.push(byte).is_err() {
            self.overflowed = self.buf.len() + 1;
            self.buf.clear();
        }

        None
    }

    /// Discard any partial line.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = 0;
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_with_sequence() {
        let text = encode(Some(3), &[0, 1, 2, 3, 4]);
        let frame = decode(&text).unwrap();
        assert_eq!(frame.seq, Some(3));
        assert_eq!(frame.values, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn accepts_layout_without_sequence() {
        assert_eq!(decode("H,0,9,4,0,9"), Ok(Frame::new([0, 9, 4, 0, 9])));
    }

    #[test]
    fn accepts_spaces_and_collapses_delimiters() {
        assert_eq!(decode("H 1 2 3 4 5"), Ok(Frame::new([1, 2, 3, 4, 5])));
        assert_eq!(
            decode("H,,7, ,0 , 1,2,,3,4"),
            Ok(Frame::with_seq(7, [0, 1, 2, 3, 4]))
        );
        assert_eq!(decode(",H,1,2,3,4,5,"), Ok(Frame::new([1, 2, 3, 4, 5])));
    }

    #[test]
    fn strips_line_terminators() {
        assert_eq!(decode("H,1,2,3,4,5\r\n"), Ok(Frame::new([1, 2, 3, 4, 5])));
        assert_eq!(decode("H,1,2,3,4,5\0"), Ok(Frame::new([1, 2, 3, 4, 5])));
    }

    #[test]
    fn rejects_wrong_header() {
        assert_eq!(decode("X,1,2,3,4,5"), Err(FrameError::BadHeader));
        assert_eq!(decode("h,1,2,3,4,5"), Err(FrameError::BadHeader));
        assert_eq!(decode("HH,1,2,3,4,5"), Err(FrameError::BadHeader));
    }

    #[test]
    fn rejects_wrong_token_count() {
        assert_eq!(decode("H,1,2,3"), Err(FrameError::TokenCount(4)));
        assert_eq!(decode("H,1,2,3,4,5,6,7"), Err(FrameError::TokenCount(8)));
        assert_eq!(decode("H,1,2,3,4,5,6,7,8,9"), Err(FrameError::TokenCount(10)));
        assert_eq!(decode(""), Err(FrameError::Empty));
        assert_eq!(decode(" , ,"), Err(FrameError::Empty));
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        assert_eq!(
            decode("H,1,2,a,3,4"),
            Err(FrameError::InvalidNumber { index: 3 })
        );
        assert_eq!(
            decode("H,1,2,3x,3,4"),
            Err(FrameError::InvalidNumber { index: 3 })
        );
        assert_eq!(
            decode("H,x,1,2,3,4,5"),
            Err(FrameError::InvalidNumber { index: 1 })
        );
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(decode("H,99,99,99,99,99"), Ok(Frame::new([9; NUM_FINGERS])));
        assert_eq!(decode("H,-4,10,9,0,5"), Ok(Frame::new([0, 9, 9, 0, 5])));
        assert_eq!(
            decode("H,99999999999999999999999,0,0,0,0"),
            Ok(Frame::new([9, 0, 0, 0, 0]))
        );
    }

    #[test]
    fn historical_range_clamps_to_seven() {
        assert_eq!(
            decode_with_max("H,9,8,7,6,5", 7),
            Ok(Frame::new([7, 7, 7, 6, 5]))
        );
    }

    #[test]
    fn sequence_must_fit_a_byte() {
        assert_eq!(
            decode("H,256,1,2,3,4,5"),
            Err(FrameError::SequenceOutOfRange(256))
        );
        assert_eq!(
            decode("H,-1,1,2,3,4,5"),
            Err(FrameError::SequenceOutOfRange(-1))
        );
        assert_eq!(
            decode("H,255,1,2,3,4,5"),
            Ok(Frame::with_seq(255, [1, 2, 3, 4, 5]))
        );
    }

    #[test]
    fn rejects_oversize_and_binary_payloads() {
        let long = [b' '; MAX_FRAME_LEN + 1];
        assert_eq!(
            decode_bytes(&long),
            Err(FrameError::TooLong(MAX_FRAME_LEN + 1))
        );
        assert_eq!(decode_bytes(&[b'H', b',', 0xFF]), Err(FrameError::NotUtf8));
    }

    #[test]
    fn accepts_frame_of_exactly_max_length() {
        let mut line = [b' '; MAX_FRAME_LEN];
        line[..11].copy_from_slice(b"H,1,2,3,4,5");
        let expected = Ok(Frame::new([1, 2, 3, 4, 5]));

        assert_eq!(decode_bytes(&line), expected);

        let mut parser = Parser::new();
        for &b in line.iter() {
            assert_eq!(parser.push(b), None);
        }
        assert_eq!(parser.push(b'\n'), Some(expected));
    }

    #[test]
    fn stream_parser_splits_lines() {
        let mut parser = Parser::new();
        let mut frames = std::vec::Vec::new();
        for &b in b"H,1,1,2,3,4,5\r\nH,0,9,4,0,9\nX,1\n".iter() {
            if let Some(result) = parser.push(b) {
                frames.push(result);
            }
        }
        assert_eq!(
            frames,
            [
                Ok(Frame::with_seq(1, [1, 2, 3, 4, 5])),
                Ok(Frame::new([0, 9, 4, 0, 9])),
                Err(FrameError::BadHeader),
            ]
        );
    }

    #[test]
    fn stream_parser_ignores_blank_lines() {
        let mut parser = Parser::new();
        assert_eq!(parser.push(b'\n'), None);
        assert_eq!(parser.push(b'\r'), None);
        assert_eq!(parser.push(b'\n'), None);
    }

    #[test]
    fn stream_parser_drops_oversize_line_and_recovers() {
        let mut parser = Parser::new();
        for _ in 0..MAX_FRAME_LEN + 10 {
            assert_eq!(parser.push(b'9'), None);
        }
        assert_eq!(
            parser.push(b'\n'),
            Some(Err(FrameError::TooLong(MAX_FRAME_LEN + 10)))
        );

        let mut last = None;
        for &b in b"H,2,2,2,2,2\n".iter() {
            last = parser.push(b);
        }
        assert_eq!(last, Some(Ok(Frame::new([2; NUM_FINGERS]))));
    }
}
