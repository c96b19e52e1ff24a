//! The `fetchTicker` conformance check.
//!
//! Fetches a ticker through a [`TickerClient`] and hands it, together with the
//! caller's skipped properties and the requested symbol, to a
//! [`TickerValidator`]. Failures from either collaborator are returned as-is.
use log::debug;

use crate::client::TickerClient;
use crate::error::CheckError;
use crate::result::Result;
use crate::skipped::SkippedProperties;
use crate::symbol::TradingSymbol;
use crate::validator::{TickerSchema, TickerValidator};

/// Label of the client operation under check.
pub const FETCH_TICKER: &str = "fetchTicker";

/// Fetches `symbol` from `client` and validates the response with `validator`.
///
/// Returns `Ok(true)` when the ticker conforms. Returns
/// [`CheckError::UnknownSymbol`] without fetching when the client does not list
/// `symbol`; transport and validation failures propagate unchanged.
pub fn check_fetch_ticker<V: TickerValidator + ?Sized>(
    client: &dyn TickerClient,
    validator: &V,
    skipped: &SkippedProperties,
    symbol: &TradingSymbol,
) -> Result<bool> {
    if !client.has_symbol(symbol) {
        return Err(CheckError::UnknownSymbol {
            exchange: client.id().to_string(),
            symbol: symbol.to_string(),
        });
    }

    let ticker = client.fetch_ticker(symbol)?;
    debug!("[{}] {} {} -> {:?}", client.id(), FETCH_TICKER, symbol, ticker);

    validator.validate_ticker(client, skipped, FETCH_TICKER, &ticker, Some(symbol))?;
    Ok(true)
}

/// A validator bundled with the check, ready to be run per (exchange, symbol).
#[derive(Debug, Clone, Default)]
pub struct TickerConformanceCheck<V = TickerSchema> {
    validator: V,
}

impl TickerConformanceCheck<TickerSchema> {
    /// Check backed by the default [`TickerSchema`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: TickerValidator> TickerConformanceCheck<V> {
    /// Check backed by a custom validator.
    pub fn with_validator(validator: V) -> Self {
        TickerConformanceCheck { validator }
    }

    /// Runs [`check_fetch_ticker`] with the bundled validator.
    pub fn run(
        &self,
        client: &dyn TickerClient,
        skipped: &SkippedProperties,
        symbol: &TradingSymbol,
    ) -> Result<bool> {
        check_fetch_ticker(client, &self.validator, skipped, symbol)
    }
}
