//!
//! Ticker conformance checking shared by the CLI and by exchange test suites.
//!
//! This crate aggregates:
//! - `error` — unified error type `CheckError` and the `ValidationError` it wraps.
//! - `result` — handy `Result<T, CheckError>` alias.
//! - `symbol` — `BASE/QUOTE[:SETTLE]` trading symbols.
//! - `ticker` — the `Ticker` record and its field names.
//! - `skipped` — per-exchange sets of properties exempt from validation.
//! - `client` — the `TickerClient` seam and a recorded-response client.
//! - `validator` — the `TickerValidator` seam and the default `TickerSchema`.
//! - `check` — the `fetchTicker` conformance check itself.
//! - `config` — per-exchange skip configuration files.
#![warn(missing_docs)]
pub mod check;
pub mod client;
pub mod config;
pub mod error;
pub mod result;
pub mod skipped;
pub mod symbol;
pub mod ticker;
pub mod validator;

pub use check::{TickerConformanceCheck, check_fetch_ticker};
pub use client::{RecordedClient, TickerClient};
pub use config::SkipConfig;
pub use error::{CheckError, ValidationError};
pub use result::Result;
pub use skipped::SkippedProperties;
pub use symbol::TradingSymbol;
pub use ticker::{Ticker, TickerField};
pub use validator::{TickerSchema, TickerValidator};
