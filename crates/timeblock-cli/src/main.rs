//! `timeblock` CLI — lay out calendar time blocks from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Lay out a calendar document (stdin → stdout)
//! timeblock layout --timezone America/New_York < calendar.json
//!
//! # Split one in-day entry into per-day fragments
//! timeblock split -i entry.json
//!
//! # Convert a stored UTC date/time into a display zone, and back
//! timeblock convert --date 2026-01-15 --time 23:30 --timezone America/New_York
//! timeblock convert --date 2026-01-15 --time 18:30 --timezone America/New_York --to-utc
//!
//! # Clip a label to a pixel width
//! timeblock clip --text "Quarterly planning" --font-size 12 --width 80
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for more detail.

mod config;

use std::io::{self, IsTerminal, Read, Write};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use timeblock_engine::time::{convert_to_utc_with_policy, parse_timezone};
use timeblock_engine::{
    clip_label_to_width, convert_to_zone, split_in_day_entry, CalendarInput, CalendarLayout,
    CombinedTimeEventInDayEntry, EstimatedTextMeasure, ZonedParams,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, Settings};

#[derive(Parser)]
#[command(
    name = "timeblock",
    version,
    about = "Calendar time-block layout: day partitioning and overlap lanes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (defaults to $TIMEBLOCK_CONFIG)
    #[arg(long, global = true)]
    config: Option<String>,

    /// More log output on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Less log output on stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    quiet: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition entries per day and assign overlap lanes
    Layout {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// IANA display timezone
        #[arg(long)]
        timezone: Option<String>,
        /// Keep archived time blocks
        #[arg(long)]
        include_archived: bool,
    },
    /// Split one in-day entry (already in display time) into per-day fragments
    Split {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Convert a date and HH:mm time between UTC storage and a timezone
    Convert {
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Time of day as HH:mm
        #[arg(long)]
        time: Option<String>,
        /// IANA timezone
        #[arg(long)]
        timezone: Option<String>,
        /// Treat the input as wall-clock time in the zone and output UTC
        #[arg(long)]
        to_utc: bool,
    },
    /// Clip a label so it fits a pixel width
    Clip {
        #[arg(long)]
        text: String,
        #[arg(long, default_value_t = 12.0)]
        font_size: f64,
        /// Container width in pixels
        #[arg(long)]
        width: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Layout {
            input,
            output,
            timezone,
            include_archived,
        } => {
            let settings = Settings::resolve(&Overrides {
                config: cli.config.map(Into::into),
                timezone,
                include_archived,
            })?;
            let calendar: CalendarInput = read_json(input.as_deref(), "calendar")?;
            debug!(
                in_day = calendar.in_day.len(),
                full_days = calendar.full_days.len(),
                timezone = %settings.layout.timezone,
                "building layout"
            );
            let layout = CalendarLayout::build(&calendar, &settings.layout)
                .context("Failed to lay out calendar")?;
            emit_json(output.as_deref(), &layout, true)?;
        }
        Commands::Split { input } => {
            let entry: CombinedTimeEventInDayEntry = read_json(input.as_deref(), "entry")?;
            let split = split_in_day_entry(&entry).context("Failed to split entry")?;
            emit_json(None, &split, true)?;
        }
        Commands::Convert {
            date,
            time,
            timezone,
            to_utc,
        } => {
            let settings = Settings::resolve(&Overrides {
                config: cli.config.map(Into::into),
                timezone,
                include_archived: false,
            })?;
            let tz = parse_timezone(&settings.layout.timezone)?;
            let params = ZonedParams {
                start_date: date
                    .parse()
                    .map_err(|e| anyhow!("Invalid date '{}': {}", date, e))?,
                start_time_in_day: time,
            };
            let converted = if to_utc {
                convert_to_utc_with_policy(&params, &tz, settings.dst_policy)?
            } else {
                convert_to_zone(&params, &tz)?
            };
            emit_json(None, &converted, false)?;
        }
        Commands::Clip {
            text,
            font_size,
            width,
        } => {
            let clipped =
                clip_label_to_width(&text, font_size, width, &EstimatedTextMeasure::default());
            println!("{}", clipped);
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8, quiet: u8) -> Result<()> {
    let default_level = match (verbose, quiet) {
        (_, q) if q >= 2 => "error",
        (_, 1) => "warn",
        (0, _) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// Read a JSON document from `path`, or stdin when no path is given.
///
/// `what` names the document in error messages ("calendar", "entry").
fn read_json<T: DeserializeOwned>(path: Option<&str>, what: &str) -> Result<T> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {} file: {}", what, path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| format!("Failed to read {} from stdin", what))?;
            buf
        }
    };
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {} JSON", what))
}

/// Serialize `value` to `path`, or to stdout as a single line-terminated document.
fn emit_json<T: Serialize>(path: Option<&str>, value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write output file: {}", path)),
        None => {
            writeln!(io::stdout().lock(), "{}", json).context("Failed to write to stdout")
        }
    }
}
