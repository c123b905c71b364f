// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Telemetry metadata messages: channel names (`PARM.`), units (`UNIT.`),
//! scaling equations (`EQNS.`) and digital bit sense plus title (`BITS.`).

use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::types::{
    Coefficient, ParsedMessage, TelemetryMessage, ANALOG_CHANNELS, CHANNEL_NAMES,
    DEFAULT_EQUATION,
};

const FORMS: [&str; 4] = ["PARM", "UNIT", "EQNS", "BITS"];
const MAX_NAME_LEN: usize = 20;
const MAX_TITLE_LEN: usize = 23;
const BITS_LEN: usize = 8;

/// Parse a telemetry metadata message.
///
/// Bodies without a known `PARM.`/`UNIT.`/`EQNS.`/`BITS.` tag are not an
/// error and come back unchanged with `None`. On a known tag the returned
/// remainder is the payload following the tag.
pub fn parse_telemetry_config(body: &str) -> ParseResult<(String, Option<ParsedMessage>)> {
    let Some((form, payload)) = split_form(body) else {
        return Ok((body.to_string(), None));
    };

    debug!("Attempting to parse telemetry-message packet ({})", form);

    let message = match form {
        "PARM" => TelemetryMessage::Parm {
            names: parse_names(form, payload)?,
        },
        "UNIT" => TelemetryMessage::Unit {
            names: parse_names(form, payload)?,
        },
        "EQNS" => TelemetryMessage::Eqns {
            coefficients: parse_equations(form, payload)?,
        },
        _ => {
            let (bits, title) = parse_bits(payload).ok_or_else(|| {
                ParseError::invalid(format!("incorrect format of {} (title too long?)", form))
            })?;
            TelemetryMessage::Bits { bits, title }
        }
    };

    Ok((
        payload.to_string(),
        Some(ParsedMessage::TelemetryMessage(message)),
    ))
}

/// Split `FORM.payload`; the payload must be a single line.
fn split_form(body: &str) -> Option<(&'static str, &str)> {
    let form = FORMS
        .iter()
        .copied()
        .find(|form| body.starts_with(form) && body[form.len()..].starts_with('.'))?;
    let payload = &body[form.len() + 1..];
    let payload = payload.strip_suffix('\n').unwrap_or(payload);
    if payload.contains('\n') {
        return None;
    }
    Some((form, payload))
}

fn parse_names(form: &'static str, payload: &str) -> ParseResult<[String; CHANNEL_NAMES]> {
    let mut names: [String; CHANNEL_NAMES] = Default::default();
    for (idx, (slot, field)) in names
        .iter_mut()
        .zip(payload.trim_end().split(','))
        .enumerate()
    {
        if field.chars().count() > MAX_NAME_LEN {
            return Err(ParseError::FieldTooLong {
                form,
                index: idx + 1,
            });
        }
        *slot = field.to_string();
    }
    Ok(names)
}

fn parse_equations(
    form: &'static str,
    payload: &str,
) -> ParseResult<[[Coefficient; 3]; ANALOG_CHANNELS]> {
    let mut coefficients = [DEFAULT_EQUATION; ANALOG_CHANNELS];
    for (idx, field) in payload
        .trim_end()
        .split(',')
        .take(ANALOG_CHANNELS * 3)
        .enumerate()
    {
        let value = parse_coefficient(field).ok_or(ParseError::NotANumber {
            form,
            index: idx + 1,
        })?;
        coefficients[idx / 3][idx % 3] = value;
    }
    Ok(coefficients)
}

/// Accepts `-?\d*\.?\d+` or an empty field (read as 0).
fn parse_coefficient(field: &str) -> Option<Coefficient> {
    if field.is_empty() {
        return Some(Coefficient::Int(0));
    }

    let unsigned = field.strip_prefix('-').unwrap_or(field);
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    match unsigned.split_once('.') {
        Some((whole, frac)) => {
            if !all_digits(whole) || frac.is_empty() || !all_digits(frac) {
                return None;
            }
            field.parse().ok().map(Coefficient::Float)
        }
        None => {
            if unsigned.is_empty() || !all_digits(unsigned) {
                return None;
            }
            match field.parse::<i64>() {
                Ok(value) => Some(Coefficient::Int(value)),
                Err(_) => field.parse().ok().map(Coefficient::Float),
            }
        }
    }
}

/// `<8 binary digits>,<title>`; the title is trimmed of spaces.
fn parse_bits(payload: &str) -> Option<(String, String)> {
    let (bits, title) = payload.trim_end().split_once(',')?;
    if bits.len() != BITS_LEN || !bits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return None;
    }
    Some((bits.to_string(), title.trim_matches(' ').to_string()))
}
