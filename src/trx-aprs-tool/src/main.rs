// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

mod config;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};

use trx_app::{init_logging, ConfigFile};
use trx_aprs::{
    parse_capability, parse_comment_telemetry, parse_telemetry, parse_telemetry_config,
    parse_telemetry_report, CommentTelemetry, ParseResult, ParsedMessage,
};

use config::{ParserKind, ToolConfig};

type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const PKG_DESCRIPTION: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " - APRS telemetry and capability parser"
);

#[derive(Debug, Parser)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = PKG_DESCRIPTION,
)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,
    /// Parser to apply (capability, telemetry, report, comment, config)
    #[arg(short = 'k', long = "kind")]
    kind: Option<ParserKind>,
    /// Pretty-print JSON output
    #[arg(long = "pretty")]
    pretty: bool,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log-level")]
    log_level: Option<String>,
    /// Message bodies; read one per line from stdin when omitted
    #[arg(value_name = "BODY")]
    bodies: Vec<String>,
}

/// Result of one parser: either a message record or comment telemetry.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Parsed {
    Message(ParsedMessage),
    Comment(CommentTelemetry),
}

#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    body: &'a str,
    remainder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed: Option<Parsed>,
}

fn process_body(kind: ParserKind, body: &str) -> ParseResult<ParseOutput<'_>> {
    let (remainder, parsed) = match kind {
        ParserKind::Capability => {
            let (rest, msg) = parse_capability(body)?;
            (rest, Some(Parsed::Message(msg)))
        }
        ParserKind::Telemetry => {
            let (rest, msg) = parse_telemetry(body)?;
            (rest, Some(Parsed::Message(msg)))
        }
        ParserKind::Report => {
            let (rest, msg) = parse_telemetry_report(body)?;
            (rest, Some(Parsed::Message(msg)))
        }
        ParserKind::Comment => {
            let (rest, telemetry) = parse_comment_telemetry(body);
            (rest, telemetry.map(Parsed::Comment))
        }
        ParserKind::Config => {
            let (rest, msg) = parse_telemetry_config(body)?;
            (rest, msg.map(Parsed::Message))
        }
    };
    Ok(ParseOutput {
        body,
        remainder,
        parsed,
    })
}

fn render(output: &ParseOutput<'_>, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(output)
    } else {
        serde_json::to_string(output)
    }
}

/// Parse every body, writing one JSON document per success.
/// Returns the number of bodies that failed to parse.
fn run<I, W>(kind: ParserKind, pretty: bool, bodies: I, out: &mut W) -> DynResult<usize>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut failures = 0;
    for body in bodies {
        let body = body?;
        if body.trim().is_empty() {
            continue;
        }
        match process_body(kind, &body) {
            Ok(output) => writeln!(out, "{}", render(&output, pretty)?)?,
            Err(e) => {
                warn!("{} parser rejected {:?}: {}", kind, body, e);
                failures += 1;
            }
        }
    }
    Ok(failures)
}

fn main() -> DynResult<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", ToolConfig::example_combined_toml());
        return Ok(());
    }

    let (cfg, config_path) = if let Some(ref path) = cli.config {
        let cfg = ToolConfig::load_from_file(path)?;
        (cfg, Some(path.clone()))
    } else {
        ToolConfig::load_from_default_paths()?
    };
    cfg.validate()
        .map_err(|e| format!("Invalid tool configuration: {}", e))?;

    init_logging(
        cli.log_level
            .as_deref()
            .or(cfg.general.log_level.as_deref()),
    );

    if let Some(ref path) = config_path {
        info!("Loaded configuration from {}", path.display());
    }

    let kind = cli.kind.unwrap_or(cfg.output.kind);
    let pretty = cli.pretty || cfg.output.pretty;
    debug!("Using {} parser", kind);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let failures = if cli.bodies.is_empty() {
        run(kind, pretty, io::stdin().lock().lines(), &mut out)?
    } else {
        run(kind, pretty, cli.bodies.into_iter().map(Ok), &mut out)?
    };
    out.flush()?;

    if failures > 0 {
        return Err(format!("{} message(s) failed to parse", failures).into());
    }
    Ok(())
}
