//! CLI argument definitions for btcx.
//!
//! Every command works on snapshots that were already fetched from the
//! explainer backend (chart, events and explain payloads saved as JSON).
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `markers` | Chart markers for events that fall on chart days |
//! | `events` | Event list, newest first |
//! | `explain` | Narrative and signal breakdown for one event |
//! | `tier` | Classify a score on the factor or confidence scale |
//! | `endpoints` | Resolve backend URLs for the configured API base |
//!
//! # Examples
//!
//! ```bash
//! btcx markers --chart chart.json --events events.json --pretty
//! curl -s "$BTCX_API_BASE/api/explain/42" | btcx explain --explain -
//! btcx tier --scale confidence 61
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// BTC move explainer: chart markers, signal breakdowns and narratives
#[derive(Debug, Parser)]
#[command(
    name = "btcx",
    author,
    version,
    about = "Explain large daily BTC moves from fetched snapshots"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Base URL of the explainer backend.
    #[arg(long, global = true, env = "BTCX_API_BASE")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Plain text for terminal display.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chart markers for events that fall on chart days.
    Markers(MarkersArgs),
    /// Event list, newest first.
    Events(EventsArgs),
    /// Narrative and signal breakdown for one event.
    Explain(ExplainArgs),
    /// Classify a score into HIGH/MED/LOW.
    Tier(TierArgs),
    /// Resolve backend URLs.
    Endpoints(EndpointsArgs),
}

#[derive(Debug, Args)]
pub struct MarkersArgs {
    /// Chart payload (`-` for stdin).
    #[arg(long)]
    pub chart: PathBuf,
    /// Events payload (`-` for stdin).
    #[arg(long)]
    pub events: PathBuf,
    /// Also include the close-price line.
    #[arg(long, default_value_t = false)]
    pub with_series: bool,
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Events payload (`-` for stdin).
    #[arg(long)]
    pub events: PathBuf,
}

#[derive(Debug, Args)]
pub struct ExplainArgs {
    /// Explain payload (`-` for stdin).
    #[arg(long)]
    pub explain: PathBuf,
    /// Print only the narrative text.
    #[arg(long, default_value_t = false)]
    pub narrative_only: bool,
}

#[derive(Debug, Args)]
pub struct TierArgs {
    /// Score scale: factor (0..1) or confidence (0..100).
    #[arg(long, default_value = "factor")]
    pub scale: String,
    /// Score to classify.
    #[arg(allow_negative_numbers = true)]
    pub score: f64,
}

#[derive(Debug, Args)]
pub struct EndpointsArgs {
    /// Days of chart history.
    #[arg(long, default_value_t = btcx_core::DEFAULT_CHART_DAYS)]
    pub days: u32,
    /// Maximum events to request.
    #[arg(long, default_value_t = btcx_core::DEFAULT_EVENT_LIMIT)]
    pub limit: u32,
    /// Event to build an explain URL for.
    #[arg(long)]
    pub event_id: Option<i64>,
}
