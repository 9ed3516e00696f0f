//! # gst-preview
//!
//! Previews the GST breakdown of a draft bill from the command line.
//!
//! ## Usage
//! ```bash
//! # Preview a bill from a file
//! gst-preview --input bill.json --pretty
//!
//! # Preview from stdin
//! echo '{"items":[{"unit_price":"118","qty":2,"gst_rate":"18","mode":"INCLUSIVE"}]}' | gst-preview
//!
//! # Check a single rate against the configured policy
//! gst-preview --check-rate 17
//! ```
//!
//! ## Output
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout  JSON only                                                      │
//! │          {"success": true, "lines": [...], "summary": {...},           │
//! │           "totals": {...}, "warnings": [...]}                          │
//! │          {"success": false, "error": "...", "errors": [...]}           │
//! │                                                                         │
//! │  stderr  logs, and the --display breakdown                              │
//! │                                                                         │
//! │  exit    0 = previewed / rate valid                                     │
//! │          1 = rejected bill, invalid rate, bad input or config           │
//! │          2 = bad arguments                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use mybilling_core::money::format_for_display;
use mybilling_core::preview::{check_gst_rate, preview_bill, BillPreview, PreviewRequest};
use mybilling_core::NumericValue;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::config::PreviewConfig;
use crate::error::{AppError, AppResult};

const USAGE: &str = "\
MyBilling GST Preview

Usage: gst-preview [OPTIONS]

Options:
  -c, --config <PATH>      Config file (default: platform config dir/gst-preview.toml)
  -i, --input <PATH>       Bill JSON file (default: stdin)
  -p, --pretty             Pretty-print JSON output
  -d, --display            Also print a readable breakdown to stderr
  -r, --check-rate <RATE>  Check a GST rate instead of previewing a bill
  -h, --help               Show this help message";

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    input: Option<PathBuf>,
    pretty: bool,
    display: bool,
    check_rate: Option<String>,
    help: bool,
}

fn parse_args(args: &[String]) -> AppResult<CliArgs> {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                cli.config = Some(PathBuf::from(option_value(args, i)?));
                i += 1;
            }
            "--input" | "-i" => {
                cli.input = Some(PathBuf::from(option_value(args, i)?));
                i += 1;
            }
            "--check-rate" | "-r" => {
                cli.check_rate = Some(option_value(args, i)?.to_string());
                i += 1;
            }
            "--pretty" | "-p" => cli.pretty = true,
            "--display" | "-d" => cli.display = true,
            "--help" | "-h" => cli.help = true,
            other => return Err(AppError::Usage(format!("Unknown argument: {}", other))),
        }
        i += 1;
    }

    Ok(cli)
}

fn option_value(args: &[String], i: usize) -> AppResult<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| AppError::Usage(format!("{} requires a value", args[i])))
}

// =============================================================================
// Main
// =============================================================================

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    if cli.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let log = init_tracing();
    let config = match PreviewConfig::load(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => return report_failure(&e, cli.pretty),
    };

    log.apply_level(&config.log.level);
    let pretty = cli.pretty || config.display.pretty;
    debug!(
        allow_custom_rates = config.gst.allow_custom_rates,
        default_mode = %config.gst.default_mode,
        "Configuration loaded"
    );

    if let Some(rate) = cli.check_rate.as_deref() {
        return run_check_rate(rate, &config, pretty);
    }

    match run_preview(&cli, &config) {
        Ok(preview) => {
            info!(
                lines = preview.lines.len(),
                warnings = preview.warnings.len(),
                grand_total = %preview.totals.final_total,
                "Bill previewed"
            );

            if cli.display {
                for line in display_lines(&preview, &config.display.currency_symbol) {
                    eprintln!("{}", line);
                }
            }

            let envelope = SuccessEnvelope {
                success: true,
                preview: &preview,
            };
            match print_json(&envelope, pretty) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => report_failure(&e, pretty),
    }
}

/// Filter handle kept after the subscriber is installed.
struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogControl {
    /// Switches to the configured level unless `RUST_LOG` chose one.
    fn apply_level(&self, level: &str) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.handle.reload(EnvFilter::new(level)) {
            warn!(error = %e, level = %level, "Could not apply configured log level");
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Installed before the config is read, at `RUST_LOG` or `info`, so config
/// loading is logged too. Logs go to stderr so stdout stays valid JSON.
fn init_tracing() -> LogControl {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new("info"), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    LogControl { handle, from_env }
}

// =============================================================================
// Commands
// =============================================================================

fn run_preview(cli: &CliArgs, config: &PreviewConfig) -> AppResult<BillPreview> {
    let raw = read_input(cli.input.as_ref())?;
    let request: PreviewRequest = serde_json::from_str(&raw)?;
    debug!(items = request.items.len(), "Preview request parsed");

    Ok(preview_bill(&request, &config.preview_options())?)
}

fn run_check_rate(rate: &str, config: &PreviewConfig, pretty: bool) -> ExitCode {
    let check = check_gst_rate(&NumericValue::from(rate), config.gst.allow_custom_rates);
    debug!(rate, valid = check.valid, "Rate checked");

    if let Err(e) = print_json(&check, pretty) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if check.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn read_input(path: Option<&PathBuf>) -> AppResult<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| AppError::InputReadFailed(format!("{}: {}", path.display(), e))),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|e| AppError::InputReadFailed(e.to_string()))?;
            Ok(raw)
        }
    }
}

// =============================================================================
// Output
// =============================================================================

#[derive(Serialize)]
struct SuccessEnvelope<'a> {
    success: bool,
    #[serde(flatten)]
    preview: &'a BillPreview,
}

#[derive(Serialize)]
struct FailureEnvelope<'a> {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [String]>,
}

impl<'a> FailureEnvelope<'a> {
    fn from_error(err: &'a AppError) -> Self {
        FailureEnvelope {
            success: false,
            error: err.to_string(),
            errors: err.item_errors(),
        }
    }
}

fn report_failure(err: &AppError, pretty: bool) -> ExitCode {
    if let Err(e) = print_json(&FailureEnvelope::from_error(err), pretty) {
        eprintln!("{}", e);
    }
    ExitCode::FAILURE
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> AppResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(|e| AppError::OutputFailed(e.to_string()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> AppResult<()> {
    let json = to_json(value, pretty)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json).map_err(|e| AppError::OutputFailed(e.to_string()))
}

/// Human-readable breakdown for `--display`.
fn display_lines(preview: &BillPreview, currency: &str) -> Vec<String> {
    let mut out = Vec::new();

    for (rate, bucket) in &preview.summary {
        out.push(format!(
            "GST {:>6}%  taxable {:>14}  gst {:>12}",
            rate,
            format_for_display(bucket.taxable_amount, currency),
            format_for_display(bucket.total_gst, currency),
        ));
    }

    let totals = &preview.totals;
    out.push(format!("Taxable amount : {}", format_for_display(totals.taxable_amount, currency)));
    out.push(format!("CGST           : {}", format_for_display(totals.cgst_amount, currency)));
    out.push(format!("SGST           : {}", format_for_display(totals.sgst_amount, currency)));
    out.push(format!("Total GST      : {}", format_for_display(totals.total_gst, currency)));
    out.push(format!("Grand total    : {}", format_for_display(totals.final_total, currency)));

    for warning in &preview.warnings {
        out.push(format!("warning: {}", warning));
    }

    out
}

// =============================================================================
// Tests
// =============================================================================
