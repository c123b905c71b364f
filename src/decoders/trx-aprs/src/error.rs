// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use thiserror::Error;

/// Failure to parse an APRS message body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{0}")]
    InvalidFormat(String),

    /// A PARM/UNIT name exceeds 20 characters (`index` is 1-based).
    #[error("incorrect format of {form} (name too long?)")]
    FieldTooLong { form: &'static str, index: usize },

    /// An EQNS coefficient is not numeric (`index` is 1-based).
    #[error("value at {index} is not a number in {form}")]
    NotANumber { form: &'static str, index: usize },
}

impl ParseError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidFormat(reason.into())
    }

    /// Human-readable reason for the failure.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_text() {
        let err = ParseError::NotANumber {
            form: "EQNS",
            index: 3,
        };
        assert_eq!(err.reason(), "value at 3 is not a number in EQNS");

        let err = ParseError::FieldTooLong {
            form: "UNIT",
            index: 2,
        };
        assert_eq!(err.reason(), "incorrect format of UNIT (name too long?)");

        let err = ParseError::invalid("Invalid telemetry format");
        assert_eq!(err.reason(), "Invalid telemetry format");
    }
}
