// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Configuration for trx-aprs-tool.
//!
//! Loaded from the `[trx-aprs-tool]` section of `trx-aprs.toml`.
//! Default search order:
//! 1. Path specified via `--config` CLI argument
//! 2. `$TRX_APRS_CONFIG`
//! 3. `./trx-aprs.toml`
//! 4. `~/.config/trx-aprs/trx-aprs.toml`
//! 5. `/etc/trx-aprs/trx-aprs.toml`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use trx_app::ConfigFile;

/// Which parser to run over each message body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ParserKind {
    Capability,
    Telemetry,
    #[default]
    Report,
    Comment,
    Config,
}

impl ParserKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Capability => "capability",
            Self::Telemetry => "telemetry",
            Self::Report => "report",
            Self::Comment => "comment",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase alphanumeric form, so `Telemetry-Report` matches `telemetryreport`.
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for ParserKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "capability" | "capabilities" => Ok(Self::Capability),
            "telemetry" => Ok(Self::Telemetry),
            "report" | "telemetryreport" => Ok(Self::Report),
            "comment" | "commenttelemetry" => Ok(Self::Comment),
            "config" | "telemetryconfig" | "telemetrymessage" => Ok(Self::Config),
            _ => Err(format!(
                "unknown parser '{}' (expected one of: capability, telemetry, report, comment, config)",
                s
            )),
        }
    }
}

impl TryFrom<String> for ParserKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub general: GeneralConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Parser applied to each body
    pub kind: ParserKind,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_log_level(self.general.log_level.as_deref())
    }

    /// Example configuration under the `[trx-aprs-tool]` header.
    pub fn example_combined_toml() -> String {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(rename = "trx-aprs-tool")]
            inner: ToolConfig,
        }
        let example = ToolConfig {
            general: GeneralConfig {
                log_level: Some("info".to_string()),
            },
            output: OutputConfig {
                kind: ParserKind::Report,
                pretty: false,
            },
        };
        toml::to_string_pretty(&Wrapper { inner: example }).unwrap_or_default()
    }
}

fn validate_log_level(level: Option<&str>) -> Result<(), String> {
    match level {
        None | Some("trace" | "debug" | "info" | "warn" | "error") => Ok(()),
        Some(level) => Err(format!(
            "[general].log_level '{}' is invalid (expected one of: trace, debug, info, warn, error)",
            level
        )),
    }
}

impl ConfigFile for ToolConfig {
    fn section_key() -> &'static str {
        "trx-aprs-tool"
    }
}
