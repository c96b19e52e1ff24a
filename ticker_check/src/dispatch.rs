//! Fan-out of conformance checks over worker threads.
//!
//! Symbols are queued on a bounded crossbeam channel; each worker pulls a
//! symbol, runs the check against the shared client and pushes the outcome on
//! a results channel. Checks share no state besides the channels.
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, unbounded};
use log::{debug, error, info};
use ticker_common::{
    CheckError, SkippedProperties, TickerClient, TickerConformanceCheck, TradingSymbol,
};

use crate::error::RunError;

/// Result of checking one symbol.
#[derive(Debug)]
pub struct CheckOutcome {
    /// Symbol that was checked.
    pub symbol: TradingSymbol,
    /// `Ok(true)` when the ticker conforms.
    pub result: Result<bool, CheckError>,
}

impl CheckOutcome {
    /// Whether the check passed.
    pub fn passed(&self) -> bool {
        matches!(self.result, Ok(true))
    }
}

/// Runs the check for every symbol on `workers` threads.
///
/// Outcomes are returned sorted by symbol.
pub fn run_checks(
    client: Arc<dyn TickerClient>,
    check: Arc<TickerConformanceCheck>,
    skipped: Arc<SkippedProperties>,
    symbols: Vec<TradingSymbol>,
    workers: usize,
) -> Result<Vec<CheckOutcome>, RunError> {
    let workers = workers.clamp(1, symbols.len().max(1));
    let (job_tx, job_rx) = bounded::<TradingSymbol>(workers);
    let (result_tx, result_rx) = unbounded::<CheckOutcome>();

    let mut handles = Vec::with_capacity(workers);
    for n in 0..workers {
        let job_rx = job_rx.clone();
        let result_tx = result_tx.clone();
        let client = Arc::clone(&client);
        let check = Arc::clone(&check);
        let skipped = Arc::clone(&skipped);

        let handle = thread::Builder::new()
            .name(format!("check-{}", n))
            .spawn(move || {
                for symbol in job_rx.iter() {
                    debug!("worker {} checking {}", n, symbol);
                    let result = check.run(client.as_ref(), &skipped, &symbol);
                    if result_tx.send(CheckOutcome { symbol, result }).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| RunError::Worker(e.to_string()))?;
        handles.push(handle);
    }
    drop(job_rx);
    drop(result_tx);

    let total = symbols.len();
    for symbol in symbols {
        job_tx
            .send(symbol)
            .map_err(|e| RunError::Worker(format!("job queue closed: {}", e)))?;
    }
    drop(job_tx);

    let mut outcomes: Vec<CheckOutcome> = result_rx.iter().collect();
    for handle in handles {
        if handle.join().is_err() {
            error!("A check worker panicked");
            return Err(RunError::Worker("check worker panicked".into()));
        }
    }
    if outcomes.len() != total {
        return Err(RunError::Worker(format!(
            "expected {} outcomes, collected {}",
            total,
            outcomes.len()
        )));
    }

    outcomes.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    info!("Ran {} checks on {} workers", total, workers);
    Ok(outcomes)
}
