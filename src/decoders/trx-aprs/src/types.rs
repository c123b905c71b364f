// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Structured results produced by the APRS sub-field parsers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Number of named channels in PARM/UNIT messages (5 analog + 8 digital).
pub const CHANNEL_NAMES: usize = 13;
/// Number of analog channels carrying EQNS coefficients.
pub const ANALOG_CHANNELS: usize = 5;

/// A parsed message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format")]
pub enum ParsedMessage {
    #[serde(rename = "capability")]
    Capability(Capability),
    #[serde(rename = "telemetry")]
    Telemetry(TelemetryFrame),
    #[serde(rename = "telemetry-report")]
    TelemetryReport(TelemetryReport),
    #[serde(rename = "telemetry-message")]
    TelemetryMessage(TelemetryMessage),
}

impl ParsedMessage {
    /// Format discriminant, identical to the serialized `format` field.
    pub fn format(&self) -> &'static str {
        match self {
            Self::Capability(_) => "capability",
            Self::Telemetry(_) => "telemetry",
            Self::TelemetryReport(_) => "telemetry-report",
            Self::TelemetryMessage(_) => "telemetry-message",
        }
    }
}

/// Station capabilities, e.g. `IGATE,MSG_CNT=0,LOC_CNT=1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    #[serde(rename = "type")]
    pub kind: String,
    pub entries: IndexMap<String, Option<String>>,
}

impl Capability {
    /// Value stored for `key`; `None` both for unknown keys and for
    /// standalone entries without a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_deref())
    }
}

/// Fixed-width telemetry frame `#sss,aaa,aaa,aaa,aaa,aaa,bbbbbbbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    /// 0 for `MIC` frames
    pub sequence_number: u16,
    pub analog_values: [u16; ANALOG_CHANNELS],
    pub digital_bits: u8,
}

/// Telemetry report with values kept verbatim.
///
/// The wire format nominally carries 3-digit values in 0..=255, but
/// decimals and values up to 999 show up in practice, so interpretation is
/// left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryReport {
    pub sequence: String,
    pub values: Vec<String>,
}

/// Base91 telemetry embedded in a comment (`|ss1122334455dd|`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentTelemetry {
    pub sequence: u16,
    pub analog_values: [u16; ANALOG_CHANNELS],
    /// Digital byte rendered least-significant bit first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_bits: Option<String>,
}

/// EQNS coefficient, kept integral when written without a decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coefficient {
    Int(i64),
    Float(f64),
}

impl Coefficient {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

/// Coefficients `(a, b, c)` applied as `a*x^2 + b*x + c`.
pub type EquationTriple = [Coefficient; 3];

/// Identity scaling used for channels an EQNS message leaves out.
pub const DEFAULT_EQUATION: EquationTriple =
    [Coefficient::Int(0), Coefficient::Int(1), Coefficient::Int(0)];

/// Telemetry metadata (PARM/UNIT/EQNS/BITS messages).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form")]
pub enum TelemetryMessage {
    #[serde(rename = "PARM")]
    Parm { names: [String; CHANNEL_NAMES] },
    #[serde(rename = "UNIT")]
    Unit { names: [String; CHANNEL_NAMES] },
    #[serde(rename = "EQNS")]
    Eqns {
        coefficients: [EquationTriple; ANALOG_CHANNELS],
    },
    #[serde(rename = "BITS")]
    Bits { bits: String, title: String },
}

impl TelemetryMessage {
    pub fn form(&self) -> &'static str {
        match self {
            Self::Parm { .. } => "PARM",
            Self::Unit { .. } => "UNIT",
            Self::Eqns { .. } => "EQNS",
            Self::Bits { .. } => "BITS",
        }
    }

    /// Apply the EQNS scaling of analog `channel` (0-based) to a raw value.
    ///
    /// Returns `None` for non-EQNS messages or an out-of-range channel.
    pub fn scale(&self, channel: usize, raw: f64) -> Option<f64> {
        let Self::Eqns { coefficients } = self else {
            return None;
        };
        let [a, b, c] = coefficients.get(channel)?;
        Some(a.as_f64() * raw * raw + b.as_f64() * raw + c.as_f64())
    }
}
