//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which report to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// One summary over the whole snapshot.
    #[default]
    Dashboard,
    /// One summary per project or counterparty.
    ByEntity,
    /// Confirmed expense per category.
    ByCategory,
    /// Progress of every budget target.
    Budgets,
}

/// Parsed command line.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "tally-report",
    version,
    about = "Summarise a ledger snapshot in one display currency"
)]
pub struct Args {
    /// Snapshot to read. Falls back to `snapshot.path` from configuration.
    #[arg(value_name = "SNAPSHOT_PATH")]
    pub path: Option<PathBuf>,

    /// Report to print.
    #[arg(short = 'v', long = "view", value_enum, default_value_t = View::Dashboard)]
    pub view: View,
}
