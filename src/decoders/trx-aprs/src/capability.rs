// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Station capability messages (`<IGATE,MSG_CNT=...`).

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::types::{Capability, ParsedMessage};

/// Where a token without `=` goes.
enum Recovery {
    /// Continuation of this key's value; the comma was part of the value.
    HaveKey(String),
    /// Nothing to continue, the token becomes a key without a value.
    NoPriorKey,
}

/// Parse a capability body such as `IGATE,MSG_CNT=0,LOC_CNT=1`.
///
/// The capability type is the leading word. Remaining `key=value` pairs are
/// collected in order; later duplicates overwrite earlier values.
pub fn parse_capability(body: &str) -> ParseResult<(String, ParsedMessage)> {
    let body = body.trim_end();
    let (kind, rest) = split_kind(body)
        .ok_or_else(|| ParseError::invalid("invalid station capability message"))?;
    let rest = rest.lines().next().unwrap_or_default().trim_end();

    debug!("Parsing {} capability message", kind);

    let mut entries: IndexMap<String, Option<String>> = IndexMap::new();
    let mut state = Recovery::NoPriorKey;

    for token in rest.split(',') {
        state = match (token.split_once('='), state) {
            (Some((key, value)), _) => {
                entries.insert(key.to_string(), Some(value.to_string()));
                Recovery::HaveKey(key.to_string())
            }
            (None, Recovery::HaveKey(key)) => {
                if let Some(Some(value)) = entries.get_mut(&key) {
                    value.push(',');
                    value.push_str(token);
                }
                Recovery::HaveKey(key)
            }
            (None, Recovery::NoPriorKey) => {
                entries.insert(token.to_string(), None);
                Recovery::NoPriorKey
            }
        };
    }

    let capability = Capability {
        kind: kind.to_string(),
        entries,
    };
    Ok((String::new(), ParsedMessage::Capability(capability)))
}

/// Split `WORD,rest` where WORD is made of word characters.
fn split_kind(body: &str) -> Option<(&str, &str)> {
    let end = body.find(|c: char| !(c.is_alphanumeric() || c == '_'))?;
    if end == 0 || !body[end..].starts_with(',') {
        return None;
    }
    Some((&body[..end], &body[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capability(body: &str) -> Capability {
        match parse_capability(body) {
            Ok((rest, ParsedMessage::Capability(cap))) => {
                assert!(rest.is_empty());
                cap
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_capability() {
        let cap = capability("IGATE,MSG_CNT=0,LOC_CNT=1");
        assert_eq!(cap.kind, "IGATE");
        assert_eq!(cap.get("MSG_CNT"), Some("0"));
        assert_eq!(cap.get("LOC_CNT"), Some("1"));
        assert_eq!(cap.entries.len(), 2);
    }

    #[test]
    fn test_capability_igate_counters() {
        let cap = capability(
            "IGATE,MSG_CNT=681,LOC_CNT=70,DIR_CNT=33,RF_CNT=117,DX=1*KB9OBX-10(133mi@339\u{b0})\r\n",
        );
        assert_eq!(cap.kind, "IGATE");
        assert_eq!(cap.get("MSG_CNT"), Some("681"));
        assert_eq!(cap.get("LOC_CNT"), Some("70"));
        assert_eq!(cap.get("DIR_CNT"), Some("33"));
        assert_eq!(cap.get("RF_CNT"), Some("117"));
        assert_eq!(cap.get("DX"), Some("1*KB9OBX-10(133mi@339\u{b0})"));
    }

    #[test]
    fn test_comma_in_value_is_rejoined() {
        let cap = capability("IGATE,MSG_CNT=681,DX=1*KB9OBX-10(133mi@339\u{b0}),via,WIDE2");
        assert_eq!(cap.get("MSG_CNT"), Some("681"));
        assert_eq!(cap.get("DX"), Some("1*KB9OBX-10(133mi@339\u{b0}),via,WIDE2"));
        assert_eq!(cap.entries.len(), 2);
    }

    #[test]
    fn test_standalone_token() {
        let cap = capability("IGATE,CLOSED");
        assert_eq!(cap.kind, "IGATE");
        assert_eq!(cap.entries.get("CLOSED"), Some(&None));
        assert_eq!(cap.get("CLOSED"), None);
    }

    #[test]
    fn test_standalone_then_pairs() {
        let cap = capability("IGATE,CLOSED,MSG_CNT=3");
        assert_eq!(cap.entries.get("CLOSED"), Some(&None));
        assert_eq!(cap.get("MSG_CNT"), Some("3"));
    }

    #[test]
    fn test_empty_standalone_token() {
        let cap = capability("IGATE,,MSG_CNT=1");
        assert_eq!(cap.entries.get(""), Some(&None));
        assert_eq!(cap.get("MSG_CNT"), Some("1"));

        let cap = capability("IGATE,");
        assert_eq!(cap.entries.len(), 1);
        assert_eq!(cap.entries.get(""), Some(&None));
    }

    #[test]
    fn test_duplicate_key_overwrites() {
        let cap = capability("IGATE,MSG_CNT=1,LOC_CNT=2,MSG_CNT=5");
        assert_eq!(cap.get("MSG_CNT"), Some("5"));
        let keys: Vec<&str> = cap.entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["MSG_CNT", "LOC_CNT"]);
    }

    #[test]
    fn test_value_with_equals() {
        let cap = capability("IGATE,NOTE=a=b");
        assert_eq!(cap.get("NOTE"), Some("a=b"));
    }

    #[test]
    fn test_invalid_capability() {
        assert!(parse_capability("").is_err());
        assert!(parse_capability("IGATE").is_err());
        assert!(parse_capability(",MSG_CNT=1").is_err());
        assert!(parse_capability("IG ATE,MSG_CNT=1").is_err());

        let err = parse_capability("IGATE").unwrap_err();
        assert_eq!(err.reason(), "invalid station capability message");
    }
}
