//! Exchange client seam and a client backed by recorded responses.
//!
//! `TickerClient` is what the conformance check consumes: something that knows
//! its exchange id, the markets it lists, and how to fetch a ticker. Real
//! network clients live outside this workspace; `RecordedClient` replays a JSON
//! document instead.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::CheckError;
use crate::result::Result;
use crate::symbol::TradingSymbol;
use crate::ticker::Ticker;

/// Exchange client able to fetch tickers.
pub trait TickerClient: Send + Sync {
    /// Exchange identifier, e.g. `binance`.
    fn id(&self) -> &str;

    /// Whether the exchange lists `symbol`.
    fn has_symbol(&self, symbol: &TradingSymbol) -> bool;

    /// Fetches a fresh ticker for `symbol`.
    ///
    /// Network or protocol failures are reported as [`CheckError::Transport`].
    fn fetch_ticker(&self, symbol: &TradingSymbol) -> Result<Ticker>;
}

/// On-disk layout of a recorded-response document.
#[derive(Debug, Deserialize)]
struct Recording {
    id: String,
    #[serde(default)]
    tickers: BTreeMap<TradingSymbol, Ticker>,
    #[serde(default)]
    errors: BTreeMap<TradingSymbol, String>,
}

/// Client that answers from recorded `fetchTicker` responses.
///
/// ```json
/// {
///   "id": "binance",
///   "tickers": { "BTC/USDT": { "symbol": "BTC/USDT", "bid": 100, "ask": 101 } },
///   "errors": { "ETH/USDT": "503 Service Unavailable" }
/// }
/// ```
///
/// Symbols under `errors` are listed, but fetching them fails with a transport error.
#[derive(Debug, Clone)]
pub struct RecordedClient {
    id: String,
    tickers: BTreeMap<TradingSymbol, Ticker>,
    errors: BTreeMap<TradingSymbol, String>,
}

impl RecordedClient {
    /// An empty recording for exchange `id`.
    pub fn new(id: &str) -> Self {
        RecordedClient {
            id: id.to_string(),
            tickers: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Records `ticker` as the response for `symbol`.
    pub fn with_ticker(mut self, symbol: TradingSymbol, ticker: Ticker) -> Self {
        self.errors.remove(&symbol);
        self.tickers.insert(symbol, ticker);
        self
    }

    /// Records a transport failure as the response for `symbol`.
    pub fn with_error(mut self, symbol: TradingSymbol, message: &str) -> Self {
        self.tickers.remove(&symbol);
        self.errors.insert(symbol, message.to_string());
        self
    }

    /// Parses a recording from JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let recording: Recording = serde_json::from_reader(reader)?;
        if recording.id.trim().is_empty() {
            return Err(CheckError::Config("recording has an empty exchange id".into()));
        }
        if let Some(symbol) = recording.tickers.keys().find(|s| recording.errors.contains_key(*s)) {
            return Err(CheckError::Config(format!(
                "symbol {} is recorded both as a ticker and as an error",
                symbol
            )));
        }
        debug!(
            "Loaded recording for {}: {} tickers, {} errors",
            recording.id,
            recording.tickers.len(),
            recording.errors.len()
        );
        Ok(RecordedClient {
            id: recording.id,
            tickers: recording.tickers,
            errors: recording.errors,
        })
    }

    /// Opens and parses a recording file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Every listed symbol, in sorted order.
    pub fn symbols(&self) -> Vec<TradingSymbol> {
        let mut symbols: Vec<_> = self
            .tickers
            .keys()
            .chain(self.errors.keys())
            .cloned()
            .collect();
        symbols.sort();
        symbols
    }
}

impl TickerClient for RecordedClient {
    fn id(&self) -> &str {
        &self.id
    }

    fn has_symbol(&self, symbol: &TradingSymbol) -> bool {
        self.tickers.contains_key(symbol) || self.errors.contains_key(symbol)
    }

    fn fetch_ticker(&self, symbol: &TradingSymbol) -> Result<Ticker> {
        if let Some(message) = self.errors.get(symbol) {
            return Err(CheckError::Transport(format!(
                "{} fetchTicker {}: {}",
                self.id, symbol, message
            )));
        }
        self.tickers.get(symbol).cloned().ok_or_else(|| CheckError::UnknownSymbol {
            exchange: self.id.clone(),
            symbol: symbol.to_string(),
        })
    }
}
