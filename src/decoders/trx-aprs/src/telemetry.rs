// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Telemetry frames (`T#sss,aaa,aaa,aaa,aaa,aaa,bbbbbbbb`).
//!
//! Two readings of the same body are offered: [`parse_telemetry`] enforces
//! the fixed 3-digit layout and converts to integers, while
//! [`parse_telemetry_report`] accepts whatever numeric-looking text is
//! present and hands it back untouched.

use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::types::{ParsedMessage, TelemetryFrame, TelemetryReport, ANALOG_CHANNELS};

const MIC_MARKER: &[u8] = b"MIC";
const DIGITAL_BITS: usize = 8;

/// Parse a fixed-width telemetry frame.
///
/// The sequence is either three digits followed by a comma or the `MIC`
/// marker (any case, optional trailing comma, optionally preceded by three
/// digits which are then ignored). Anything after the digital bits is
/// discarded.
pub fn parse_telemetry(body: &str) -> ParseResult<(String, ParsedMessage)> {
    let frame = parse_frame(body.as_bytes())
        .ok_or_else(|| ParseError::invalid("Invalid telemetry format"))?;
    Ok((String::new(), ParsedMessage::Telemetry(frame)))
}

fn parse_frame(bytes: &[u8]) -> Option<TelemetryFrame> {
    let rest = bytes.strip_prefix(b"#")?;
    let (sequence_number, mut rest) = parse_sequence(rest)?;

    let mut analog_values = [0u16; ANALOG_CHANNELS];
    for value in analog_values.iter_mut() {
        let (parsed, tail) = take_digits(rest, 3)?;
        *value = parsed;
        rest = tail.strip_prefix(b",")?;
    }

    let bits = rest.get(..DIGITAL_BITS)?;
    let digital_bits = bits.iter().try_fold(0u8, |acc, &b| match b {
        b'0' => Some(acc << 1),
        b'1' => Some((acc << 1) | 1),
        _ => None,
    })?;

    Some(TelemetryFrame {
        sequence_number,
        analog_values,
        digital_bits,
    })
}

fn parse_sequence(bytes: &[u8]) -> Option<(u16, &[u8])> {
    if let Some((value, rest)) = take_digits(bytes, 3) {
        if let Some(rest) = rest.strip_prefix(b",") {
            return Some((value, rest));
        }
        return strip_mic(rest).map(|rest| (0, rest));
    }
    strip_mic(bytes).map(|rest| (0, rest))
}

fn strip_mic(bytes: &[u8]) -> Option<&[u8]> {
    let marker = bytes.get(..MIC_MARKER.len())?;
    if !marker.eq_ignore_ascii_case(MIC_MARKER) {
        return None;
    }
    let rest = &bytes[MIC_MARKER.len()..];
    Some(rest.strip_prefix(b",").unwrap_or(rest))
}

/// Exactly `count` ASCII digits as an integer, plus the rest of the input.
fn take_digits(bytes: &[u8], count: usize) -> Option<(u16, &[u8])> {
    let digits = bytes.get(..count)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u16, |acc, &d| acc * 10 + u16::from(d - b'0'));
    Some((value, &bytes[count..]))
}

/// Parse a telemetry report without coercing its values.
///
/// Strictly the values are 3 digits in 0..=255, but decimals and values up
/// to 999 are common, so both the sequence and the values are returned as
/// the text found on the wire.
pub fn parse_telemetry_report(body: &str) -> ParseResult<(String, ParsedMessage)> {
    let (sequence, values) = split_report(body).ok_or_else(|| {
        ParseError::invalid("incorrect format for telemetry report packet - non-integer values?")
    })?;

    debug!("Attempting to parse telemetry report packet");

    let report = TelemetryReport {
        sequence: sequence.to_string(),
        values: values.split(',').map(str::to_string).collect(),
    };
    Ok((String::new(), ParsedMessage::TelemetryReport(report)))
}

/// Split `#<MIC|digits>[,]<values>` into sequence and value text.
fn split_report(body: &str) -> Option<(&str, &str)> {
    let body = body.strip_suffix('\n').unwrap_or(body);
    let rest = body.strip_prefix('#')?;

    let seq_len = if rest.starts_with("MIC") {
        MIC_MARKER.len()
    } else {
        rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len())
    };
    if seq_len == 0 {
        return None;
    }

    let (sequence, tail) = rest.split_at(seq_len);
    if !tail.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    match tail.strip_prefix(',').unwrap_or(tail) {
        "" if tail == "," => Some((sequence, tail)),
        // Nothing left after the digits: the last digit becomes the value.
        "" if seq_len > 1 && sequence != "MIC" => Some(sequence.split_at(seq_len - 1)),
        "" => None,
        values => Some((sequence, values)),
    }
}
