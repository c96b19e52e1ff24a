//! Ticker Check — runs the `fetchTicker` conformance check against recorded exchange
//! responses and reports which symbols conform to the ticker contract.
//!
//! Usage example (CLI):
//! ```bash
//! ticker_check --responses ./fixtures/binance.json --skip-config ./fixtures/skip.json \
//!     --symbol BTC/USDT --symbol ETH/USDT
//! ```
//!
//! Without `--symbol`, every recorded symbol is checked. The process exits with an
//! error when any check fails. Set `RUST_LOG=debug` to see every fetched ticker.
#![warn(missing_docs)]
mod args;
mod dispatch;
mod error;

use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use ticker_common::{
    RecordedClient, SkipConfig, TickerClient, TickerConformanceCheck, TradingSymbol,
};

use crate::args::Args;
use crate::dispatch::{CheckOutcome, run_checks};
use crate::error::RunError;

fn main() -> Result<(), RunError> {
    init_logger();
    let args = Args::parse();

    let client = RecordedClient::from_path(&args.responses)?;
    info!("Loaded recorded responses for {}", client.id());

    let config = match &args.skip_config {
        Some(path) => SkipConfig::from_path(path)?,
        None => SkipConfig::default(),
    };
    if config.is_skipped(client.id()) {
        warn!("{} is disabled in the skip configuration, nothing to check", client.id());
        return Ok(());
    }
    let skipped = config.skipped_for(client.id());
    if !skipped.is_empty() {
        info!(
            "Skipping properties for {}: {}",
            client.id(),
            skipped.iter().collect::<Vec<_>>().join(", ")
        );
    }

    let symbols = select_symbols(&args.symbols, &client)?;
    let outcomes = run_checks(
        Arc::new(client),
        Arc::new(TickerConformanceCheck::new()),
        Arc::new(skipped),
        symbols,
        usize::from(args.workers),
    )?;

    summarize(&outcomes)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Parses the requested symbols, or lists every recorded one when none were given.
fn select_symbols(raw: &[String], client: &RecordedClient) -> Result<Vec<TradingSymbol>, RunError> {
    if raw.is_empty() {
        return Ok(client.symbols());
    }
    let mut symbols = raw
        .iter()
        .map(|s| s.trim().parse::<TradingSymbol>())
        .collect::<Result<Vec<_>, _>>()?;
    symbols.sort();
    symbols.dedup();
    Ok(symbols)
}

/// Logs each outcome and fails the run when any check failed.
fn summarize(outcomes: &[CheckOutcome]) -> Result<(), RunError> {
    let mut failed = 0;
    for outcome in outcomes {
        match &outcome.result {
            Ok(true) => info!("PASS {}", outcome.symbol),
            Ok(false) => {
                failed += 1;
                error!("FAIL {}: check returned false", outcome.symbol);
            }
            Err(e) => {
                failed += 1;
                error!("FAIL {}: {}", outcome.symbol, e);
            }
        }
    }

    info!("{} passed, {} failed", outcomes.len() - failed, failed);
    if failed > 0 {
        return Err(RunError::Failed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}
