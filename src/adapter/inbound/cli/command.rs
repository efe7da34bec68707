//! Command-line interface definitions.
//!
//! Defines the CLI structure for the walletlens application using `clap`:
//! summarize an address's holdings, or list its recorded summaries.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Account asset summaries: native balance, tracked tokens and NFTs
#[derive(Parser, Debug)]
#[command(name = "walletlens")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to walletlens.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the walletlens CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize an address's native balance, tracked tokens and NFTs
    Summary(SummaryArgs),

    /// Show previously returned summaries for an address, newest first
    History(HistoryArgs),
}

/// Arguments for `walletlens summary`.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Address to summarize (0x followed by 40 hex digits)
    pub address: String,

    /// Do not append this summary to the query history
    #[arg(long)]
    pub no_record: bool,

    /// Abort if the summary takes longer than this many milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,
}

/// Arguments for `walletlens history`.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Address whose history to show
    pub address: String,

    /// Maximum entries to show
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,
}
