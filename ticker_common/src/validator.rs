//! Structural validation of ticker records.
//!
//! `TickerValidator` is the seam the conformance check calls into; `TickerSchema`
//! is the default contract. Every rule can be switched off for an exchange by
//! naming the field (or a pseudo-property such as `spread`) in its
//! [`SkippedProperties`].
use chrono::{DateTime, SecondsFormat, Utc};
use log::trace;
use strum::IntoEnumIterator;

use crate::client::TickerClient;
use crate::error::ValidationError;
use crate::skipped::{COMPARE_OHLC, SPREAD, SkippedProperties};
use crate::symbol::TradingSymbol;
use crate::ticker::{Ticker, TickerField};

/// Earliest accepted timestamp: 2009-01-03T00:00:00Z in milliseconds.
pub const MIN_TIMESTAMP_MS: i64 = 1_230_940_800_000;
/// First rejected timestamp: 2038-01-19T03:14:08Z in milliseconds.
pub const MAX_TIMESTAMP_MS: i64 = 2_147_483_648_000;

/// Prices that must be strictly positive when present.
const POSITIVE: [TickerField; 10] = [
    TickerField::Open,
    TickerField::High,
    TickerField::Low,
    TickerField::Close,
    TickerField::Last,
    TickerField::Bid,
    TickerField::Ask,
    TickerField::Vwap,
    TickerField::Average,
    TickerField::PreviousClose,
];

/// Sizes that must not be negative when present.
const NON_NEGATIVE: [TickerField; 4] = [
    TickerField::BidVolume,
    TickerField::AskVolume,
    TickerField::BaseVolume,
    TickerField::QuoteVolume,
];

/// Structural validator for tickers.
pub trait TickerValidator: Send + Sync {
    /// Checks `ticker` against the contract, ignoring everything in `skipped`.
    ///
    /// `method` labels the client operation that produced the ticker and
    /// `symbol` is the symbol it was requested for, when there was one.
    fn validate_ticker(
        &self,
        client: &dyn TickerClient,
        skipped: &SkippedProperties,
        method: &str,
        ticker: &Ticker,
        symbol: Option<&TradingSymbol>,
    ) -> Result<(), ValidationError>;
}

/// Default ticker contract.
///
/// - required fields must be present (`symbol`, `timestamp`, `bid`, `ask`, `last`
///   unless configured otherwise);
/// - numbers must be finite, prices positive and sizes non-negative;
/// - `timestamp` must fall in `[MIN_TIMESTAMP_MS, MAX_TIMESTAMP_MS)` and `datetime`
///   must be its ISO-8601 rendering;
/// - `bid <= ask` (pseudo-property `spread`);
/// - `low <= high` with `open`, `close` and `last` inside that range
///   (pseudo-property `compareOHLC`);
/// - `close == last`, and the ticker symbol equals the requested one.
#[derive(Debug, Clone)]
pub struct TickerSchema {
    required: Vec<TickerField>,
}

impl Default for TickerSchema {
    fn default() -> Self {
        TickerSchema {
            required: vec![
                TickerField::Symbol,
                TickerField::Timestamp,
                TickerField::Bid,
                TickerField::Ask,
                TickerField::Last,
            ],
        }
    }
}

impl TickerSchema {
    /// Schema with the default required fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set of fields that must be present.
    pub fn with_required(mut self, fields: &[TickerField]) -> Self {
        self.required = fields.to_vec();
        self
    }

    /// Fields that must be present.
    pub fn required(&self) -> &[TickerField] {
        &self.required
    }
}

/// Builds errors carrying the exchange/method/symbol context.
struct Report<'a> {
    exchange: &'a str,
    method: &'a str,
    symbol: String,
}

impl Report<'_> {
    fn fail(&self, field: &str, reason: impl Into<String>) -> ValidationError {
        ValidationError {
            exchange: self.exchange.to_string(),
            method: self.method.to_string(),
            symbol: self.symbol.clone(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Renders a millisecond timestamp as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn iso8601(timestamp_ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl TickerSchema {
    fn check_symbol(
        &self,
        report: &Report<'_>,
        skipped: &SkippedProperties,
        ticker: &Ticker,
        requested: Option<&TradingSymbol>,
    ) -> Result<(), ValidationError> {
        if skipped.skips(TickerField::Symbol) {
            return Ok(());
        }
        let Some(actual) = ticker.symbol.as_deref() else {
            return Ok(());
        };
        if actual.trim().is_empty() {
            return Err(report.fail("symbol", "is empty"));
        }
        if let Some(requested) = requested {
            if actual != requested.to_string() {
                return Err(report.fail(
                    "symbol",
                    format!("is \"{}\" but \"{}\" was requested", actual, requested),
                ));
            }
        }
        Ok(())
    }

    fn check_time(
        &self,
        report: &Report<'_>,
        skipped: &SkippedProperties,
        ticker: &Ticker,
    ) -> Result<(), ValidationError> {
        if !skipped.skips(TickerField::Timestamp) {
            if let Some(ts) = ticker.timestamp {
                if !(MIN_TIMESTAMP_MS..MAX_TIMESTAMP_MS).contains(&ts) {
                    return Err(report.fail(
                        "timestamp",
                        format!(
                            "{} is outside [{}, {})",
                            ts, MIN_TIMESTAMP_MS, MAX_TIMESTAMP_MS
                        ),
                    ));
                }
            }
        }

        if skipped.skips(TickerField::Datetime) {
            return Ok(());
        }
        let Some(datetime) = ticker.datetime.as_deref() else {
            return Ok(());
        };
        let Some(ts) = ticker.timestamp else {
            return Err(report.fail("datetime", "is set but timestamp is missing"));
        };
        match iso8601(ts) {
            Some(expected) if expected == datetime => Ok(()),
            Some(expected) => Err(report.fail(
                "datetime",
                format!("is \"{}\" but timestamp {} renders as \"{}\"", datetime, ts, expected),
            )),
            None => Err(report.fail("timestamp", format!("{} cannot be rendered as a date", ts))),
        }
    }

    fn check_numbers(
        &self,
        report: &Report<'_>,
        skipped: &SkippedProperties,
        ticker: &Ticker,
    ) -> Result<(), ValidationError> {
        let value = |field: TickerField| {
            if skipped.skips(field) {
                None
            } else {
                ticker.numeric(field)
            }
        };

        for field in TickerField::iter().filter(|f| f.is_numeric()) {
            if let Some(v) = value(field) {
                if !v.is_finite() {
                    return Err(report.fail(field.name(), format!("{} is not a finite number", v)));
                }
            }
        }
        for field in POSITIVE {
            if let Some(v) = value(field) {
                if v <= 0.0 {
                    return Err(report.fail(field.name(), format!("{} must be greater than 0", v)));
                }
            }
        }
        for field in NON_NEGATIVE {
            if let Some(v) = value(field) {
                if v < 0.0 {
                    return Err(report.fail(field.name(), format!("{} must not be negative", v)));
                }
            }
        }
        Ok(())
    }

    fn check_comparisons(
        &self,
        report: &Report<'_>,
        skipped: &SkippedProperties,
        ticker: &Ticker,
    ) -> Result<(), ValidationError> {
        if !skipped.contains(SPREAD) {
            if let (Some(bid), Some(ask)) = (ticker.bid, ticker.ask) {
                if bid > ask {
                    return Err(report.fail(
                        SPREAD,
                        format!("bid {} is greater than ask {}", bid, ask),
                    ));
                }
            }
        }

        if !skipped.contains(COMPARE_OHLC) {
            if let (Some(high), Some(low)) = (ticker.high, ticker.low) {
                if low > high {
                    return Err(report.fail(
                        "low",
                        format!("{} is greater than high {}", low, high),
                    ));
                }
                for field in [TickerField::Open, TickerField::Close, TickerField::Last] {
                    if let Some(v) = ticker.numeric(field) {
                        if v < low || v > high {
                            return Err(report.fail(
                                field.name(),
                                format!("{} is outside the low/high range [{}, {}]", v, low, high),
                            ));
                        }
                    }
                }
            }
        }

        if !skipped.skips(TickerField::Close) {
            if let (Some(close), Some(last)) = (ticker.close, ticker.last) {
                if close != last {
                    return Err(report.fail(
                        "close",
                        format!("{} differs from last {}", close, last),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl TickerValidator for TickerSchema {
    fn validate_ticker(
        &self,
        client: &dyn TickerClient,
        skipped: &SkippedProperties,
        method: &str,
        ticker: &Ticker,
        symbol: Option<&TradingSymbol>,
    ) -> Result<(), ValidationError> {
        let report = Report {
            exchange: client.id(),
            method,
            symbol: symbol
                .map(ToString::to_string)
                .or_else(|| ticker.symbol.clone())
                .unwrap_or_else(|| "?".to_string()),
        };

        for field in &self.required {
            if !skipped.skips(*field) && !ticker.has(*field) {
                return Err(report.fail(field.name(), "is missing"));
            }
        }
        self.check_symbol(&report, skipped, ticker, symbol)?;
        self.check_time(&report, skipped, ticker)?;
        self.check_numbers(&report, skipped, ticker)?;
        self.check_comparisons(&report, skipped, ticker)?;

        trace!("[{}] {} {} conforms", report.exchange, method, report.symbol);
        Ok(())
    }
}
