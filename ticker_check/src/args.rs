//! Command-line arguments for the ticker checker.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON file with recorded `fetchTicker` responses.
    #[clap(long)]
    pub responses: PathBuf,

    /// Path to a JSON file with per-exchange skip settings.
    #[clap(long)]
    pub skip_config: Option<PathBuf>,

    /// Symbol to check (repeatable). Defaults to every recorded symbol.
    #[clap(long = "symbol")]
    pub symbols: Vec<String>,

    /// Number of worker threads running checks.
    #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=64))]
    pub workers: u16,
}
