//! CLI argument definitions for axiom.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Latest quote for one or more symbols |
//! | `history` | Close series for a symbol |
//! | `indices` | Headline indices and commodities |
//! | `forex` | Tracked currency pairs |
//! | `crypto` | Tracked crypto assets |
//! | `macro` | Macroeconomic indicators |
//! | `news` | Market headlines |
//! | `asset-news` | Headlines for one asset |
//! | `search` | Asset search |
//! | `anomalies` | Z-score outliers in a symbol's history |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--offline` | `false` | Never call upstream providers |
//! | `--timeout-ms` | `AXIOM_TIMEOUT_MS` or 10000 | Per-request timeout |
//! | `--verbose` | `false` | Debug diagnostics on stderr |
//!
//! # Examples
//!
//! ```bash
//! axiom quote AAPL MSFT --pretty
//! axiom history ^GSPC --range 3mo
//! axiom news "rate cut" --interpret
//! axiom anomalies BTC-USD --range 1y --threshold 2.5
//! ```

use axiom_core::DEFAULT_ANOMALY_THRESHOLD;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Market data aggregation CLI.
///
/// Every command answers even when upstream providers are unreachable;
/// records built from placeholder data carry `"source": "mock"`.
#[derive(Debug, Parser)]
#[command(name = "axiom", author, version, about = "Market data aggregation CLI")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve everything from the synthetic generator.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Request timeout in milliseconds; overrides AXIOM_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Emit debug diagnostics on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON envelope.
    Json,
    /// Metadata header plus one row per record.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Latest quote for one or more symbols.
    Quote(QuoteArgs),
    /// Close series for a symbol.
    History(HistoryArgs),
    /// Headline indices and commodities.
    Indices,
    /// Tracked currency pairs.
    Forex,
    /// Tracked crypto assets.
    Crypto,
    /// Fed funds, CPI, unemployment, and GDP growth.
    Macro,
    /// Market headlines for a query.
    News(NewsArgs),
    /// Headlines for one asset.
    AssetNews(AssetNewsArgs),
    /// Find assets by symbol or name.
    Search(SearchArgs),
    /// Z-score outliers in a symbol's history.
    Anomalies(AnomaliesArgs),
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Symbols such as AAPL, ^GSPC, GC=F, BTC-USD.
    #[arg(required = true)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    pub symbol: String,

    /// Look-back window: 5d, 1mo, 3mo, 6mo, 1y.
    #[arg(long, default_value = "1mo")]
    pub range: String,
}

#[derive(Debug, Args)]
pub struct NewsArgs {
    /// Search query; defaults to a general market query.
    pub query: Option<String>,

    /// Attach a rule-based interpretation to each headline.
    #[arg(long, default_value_t = false)]
    pub interpret: bool,
}

#[derive(Debug, Args)]
pub struct AssetNewsArgs {
    pub symbol: String,

    /// Display name used as the search query instead of the symbol.
    #[arg(long)]
    pub name: Option<String>,

    /// Attach a rule-based interpretation to each headline.
    #[arg(long, default_value_t = false)]
    pub interpret: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub query: String,
}

#[derive(Debug, Args)]
pub struct AnomaliesArgs {
    pub symbol: String,

    /// Look-back window: 5d, 1mo, 3mo, 6mo, 1y.
    #[arg(long, default_value = "1mo")]
    pub range: String,

    /// Minimum |z-score| to report.
    #[arg(long, default_value_t = DEFAULT_ANOMALY_THRESHOLD)]
    pub threshold: f64,
}
