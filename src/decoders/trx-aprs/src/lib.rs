// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! APRS telemetry and station capability parsing.
//!
//! Each parser takes an already-extracted message body and returns the
//! unconsumed remainder together with the structured result. The parsers
//! are pure functions and can be called from any thread.

pub mod base91;
pub mod capability;
pub mod comment;
pub mod error;
pub mod telemetry;
pub mod telemetry_config;
pub mod types;

pub use base91::decode_base91_pair;
pub use capability::parse_capability;
pub use comment::parse_comment_telemetry;
pub use error::{ParseError, ParseResult};
pub use telemetry::{parse_telemetry, parse_telemetry_report};
pub use telemetry_config::parse_telemetry_config;
pub use types::{
    Capability, Coefficient, CommentTelemetry, EquationTriple, ParsedMessage, TelemetryFrame,
    TelemetryMessage, TelemetryReport,
};
