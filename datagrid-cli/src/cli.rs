//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "datagrid",
    version,
    about = "Inspect table state and URL query transitions from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to a file.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render one page of a JSON array of rows.
    Table(TableArgs),

    /// Apply a filter or page transition to a URL and print the result.
    Query(QueryArgs),
}

#[derive(Args)]
pub struct TableArgs {
    /// JSON file holding an array of objects.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sort by this field.
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long = "desc")]
    pub desc: bool,

    /// Page to show (out-of-range pages are clamped).
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Rows per page.
    #[arg(long = "per-page", value_name = "N")]
    pub per_page: Option<usize>,

    /// Select a row by id (repeatable).
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Select every row on the shown page.
    #[arg(long = "select-all")]
    pub select_all: bool,

    /// Columns as `key[:Label]`, comma separated.
    #[arg(long = "columns", value_name = "SPEC")]
    pub columns: Option<String>,

    /// Show the compact page bar with an overflow range.
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Current location, e.g. `/products?color=red&page=2`.
    #[arg(value_name = "HREF")]
    pub href: String,

    #[command(subcommand)]
    pub action: QueryAction,
}

/// Merge flags shared by the filter-writing actions.
#[derive(Args)]
pub struct MergeArgs {
    /// Replace the key instead of appending values.
    #[arg(long = "single")]
    pub single: bool,

    /// Keep the current page instead of resetting to 1.
    #[arg(long = "keep-page")]
    pub keep_page: bool,

    /// Drop this key while merging (repeatable).
    #[arg(long = "clear", value_name = "KEY")]
    pub clear: Vec<String>,
}

#[derive(Subcommand)]
pub enum QueryAction {
    /// Write values for one key.
    SetFilter {
        key: String,
        #[arg(required = true)]
        values: Vec<String>,
        #[command(flatten)]
        merge: MergeArgs,
        /// Drop every other parameter first.
        #[arg(long = "reset-filters")]
        reset_filters: bool,
    },

    /// Write several keys at once from `KEY=VALUE` pairs.
    SetFilters {
        #[arg(value_name = "KEY=VALUE", required = true)]
        pairs: Vec<String>,
        #[command(flatten)]
        merge: MergeArgs,
        /// Keep existing parameters instead of starting from an empty query.
        #[arg(long = "merge")]
        keep_existing: bool,
    },

    /// Add `KEY=VALUE` if absent, remove it otherwise.
    Toggle { key: String, value: String },

    /// Remove every value for a key.
    Remove { key: String },

    /// Go to a page.
    GotoPage {
        #[arg(allow_hyphen_values = true)]
        raw: String,
    },

    /// Remove all filters.
    Clear {
        /// Keep this key (repeatable).
        #[arg(long = "keep", value_name = "KEY")]
        keep: Vec<String>,
    },

    /// Print the per-key grouped query strings as JSON.
    Grouped,
}
