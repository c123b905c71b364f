// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Base91 digits as used by compressed positions and comment telemetry.

const BASE91_OFFSET: u8 = b'!';
const BASE91_LAST: u8 = b'{';

/// Returns true for bytes in the printable base91 range `!`..=`{`.
pub fn is_base91_digit(b: u8) -> bool {
    (BASE91_OFFSET..=BASE91_LAST).contains(&b)
}

/// Decode a run of base91 digits (normally a 2-digit channel value).
///
/// Two digits decode into `0..=8280`. Bytes outside the base91 range are
/// clamped to zero; an empty string decodes to 0.
pub fn decode_base91_pair(text: &str) -> u16 {
    text.bytes().fold(0u16, |acc, b| {
        let digit = b.saturating_sub(BASE91_OFFSET).min(90) as u16;
        acc.wrapping_mul(91).wrapping_add(digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pair() {
        assert_eq!(decode_base91_pair("!!"), 0);
        assert_eq!(decode_base91_pair("!\""), 1);
        assert_eq!(decode_base91_pair("\"!"), 91);
        assert_eq!(decode_base91_pair("{{"), 8280);
        assert_eq!(decode_base91_pair(""), 0);
    }

    #[test]
    fn test_digit_range() {
        assert!(is_base91_digit(b'!'));
        assert!(is_base91_digit(b'{'));
        assert!(!is_base91_digit(b'|'));
        assert!(!is_base91_digit(b' '));
    }
}
