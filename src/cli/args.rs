/// CLI argument definitions via clap derive.
use clap::{Parser, ValueEnum};

use crate::atlas::SEARCH_URL;

/// boardgameatlas — search the Board Game Atlas catalogue.
///
/// Example: boardgameatlas --query "ticket to ride" --clientId abc123 --skip 10 --limit 5
#[derive(Debug, Parser)]
#[command(
    name = "boardgameatlas",
    about = "Search the Board Game Atlas catalogue from the CLI",
    version
)]
pub struct Cli {
    /// Boardgame name to search.
    #[arg(long, value_name = "NAME")]
    pub query: Option<String>,

    /// Boardgame Atlas client_id.
    #[arg(long = "clientId", visible_alias = "client-id", value_name = "CLIENT_ID")]
    pub client_id: Option<String>,

    /// Limits the number of results returned.
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub limit: u64,

    /// Skips the number of results provided.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub skip: u64,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 10)]
    pub timeout: u64,

    /// Output format. `auto` prints labelled text.
    #[arg(long, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long)]
    pub no_header: bool,

    /// When to emphasize field labels in text output.
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Log request details and timings to stderr.
    #[arg(long)]
    pub debug: bool,

    /// Search endpoint override.
    #[arg(long, hide = true, default_value = SEARCH_URL)]
    pub endpoint: String,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Same as `text`.
    #[default]
    Auto,
    /// Name, description and URL per game, blank line between games.
    Text,
    /// The whole search result as pretty-printed JSON.
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Newline-delimited JSON (one game per line).
    Ndjson,
    /// Aligned table with headers (human-readable).
    Table,
    /// Game name only, one per line.
    Id,
}

/// Label emphasis policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ColorMode {
    /// Emphasize only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}
