// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Base91 telemetry embedded in comment text (`|ss1122334455dd|`).

use tracing::debug;

use crate::base91::{decode_base91_pair, is_base91_digit};
use crate::types::{CommentTelemetry, ANALOG_CHANNELS};

const BLOCK_DELIMITER: u8 = b'|';
const MIN_PAYLOAD: usize = 4;
const MAX_PAYLOAD: usize = 14;

/// Extract comment telemetry, returning the comment without the block.
///
/// Absence of a block is not an error: the text comes back unchanged with
/// no telemetry. Channels missing from a short block read as 0, and the
/// digital bits are only reported when the block carries them.
pub fn parse_comment_telemetry(text: &str) -> (String, Option<CommentTelemetry>) {
    // Comments are single-line; one trailing newline is tolerated and
    // dropped from the remainder.
    let line = text.strip_suffix('\n').unwrap_or(text);
    if line.contains('\n') {
        return (text.to_string(), None);
    }
    let Some((start, end)) = find_last_block(line.as_bytes()) else {
        return (text.to_string(), None);
    };
    let payload = &line[start + 1..end];
    if payload.len() % 2 != 0 {
        return (text.to_string(), None);
    }

    debug!("Found comment telemetry block |{}|", payload);

    let decoded: Vec<u16> = (0..payload.len() / 2)
        .map(|i| decode_base91_pair(&payload[i * 2..i * 2 + 2]))
        .collect();
    let channel = |i: usize| decoded.get(i).copied().unwrap_or(0);

    let telemetry = CommentTelemetry {
        sequence: channel(0),
        analog_values: std::array::from_fn(|i| channel(i + 1)),
        digital_bits: decoded
            .get(ANALOG_CHANNELS + 1)
            .map(|raw| format!("{:08b}", raw & 0xFF).chars().rev().collect()),
    };

    let remaining = format!("{}{}", &line[..start], &line[end + 1..]);
    (remaining, Some(telemetry))
}

/// Byte offsets of the opening and closing delimiter of the last block
/// whose payload is 4 to 14 base91 digits.
fn find_last_block(bytes: &[u8]) -> Option<(usize, usize)> {
    let mut found = None;
    for (start, _) in bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == BLOCK_DELIMITER)
    {
        let len = bytes[start + 1..]
            .iter()
            .take_while(|&&b| is_base91_digit(b))
            .count();
        let end = start + 1 + len;
        if (MIN_PAYLOAD..=MAX_PAYLOAD).contains(&len) && bytes.get(end) == Some(&BLOCK_DELIMITER)
        {
            found = Some((start, end));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_block() {
        let (rest, telemetry) = parse_comment_telemetry("Comment |!\"!#!$!%!&!'!(| tail");
        assert_eq!(rest, "Comment  tail");
        let telemetry = telemetry.expect("telemetry");
        assert_eq!(telemetry.sequence, 1);
        assert_eq!(telemetry.analog_values, [2, 3, 4, 5, 6]);
        assert_eq!(telemetry.digital_bits.as_deref(), Some("11100000"));
    }

    #[test]
    fn test_digital_bits_use_low_byte_lsb_first() {
        let (rest, telemetry) = parse_comment_telemetry("|!!!!!!!!!!!!{{|");
        assert_eq!(rest, "");
        let telemetry = telemetry.expect("telemetry");
        assert_eq!(telemetry.analog_values, [0; 5]);
        // 8280 = 0x2058, low byte 0b0101_1000
        assert_eq!(telemetry.digital_bits.as_deref(), Some("00011010"));
    }

    #[test]
    fn test_short_block() {
        let (rest, telemetry) = parse_comment_telemetry("abc|\"!!#|");
        assert_eq!(rest, "abc");
        let telemetry = telemetry.expect("telemetry");
        assert_eq!(telemetry.sequence, 91);
        assert_eq!(telemetry.analog_values, [2, 0, 0, 0, 0]);
        assert_eq!(telemetry.digital_bits, None);
    }

    #[test]
    fn test_last_block_wins() {
        let (rest, telemetry) = parse_comment_telemetry("A|!!!!|B|\"!!!|C");
        assert_eq!(rest, "A|!!!!|BC");
        assert_eq!(telemetry.expect("telemetry").sequence, 91);
    }

    #[test]
    fn test_no_block_returns_input() {
        for text in [
            "",
            "just a comment",
            "pipe | but no block",
            "|!!|",
            "|!!!!!!!!!!!!!!!!|",
            "|!! !!|",
            "|!!!!",
        ] {
            let (rest, telemetry) = parse_comment_telemetry(text);
            assert_eq!(rest, text);
            assert!(telemetry.is_none(), "{}", text);
        }
    }

    #[test]
    fn test_multi_line_text_is_ignored() {
        let text = "line1\nabc|!!!!|";
        let (rest, telemetry) = parse_comment_telemetry(text);
        assert_eq!(rest, text);
        assert!(telemetry.is_none());
    }

    #[test]
    fn test_trailing_newline_is_dropped() {
        let (rest, telemetry) = parse_comment_telemetry("abc|!!!!| def\n");
        assert_eq!(rest, "abc def");
        assert_eq!(telemetry.expect("telemetry").sequence, 0);
    }

    #[test]
    fn test_odd_payload_is_ignored() {
        let text = "wx |!!!!!| station";
        let (rest, telemetry) = parse_comment_telemetry(text);
        assert_eq!(rest, text);
        assert!(telemetry.is_none());
    }
}
