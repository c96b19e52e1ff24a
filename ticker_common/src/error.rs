//! Error types shared by the conformance check, its collaborators, and the CLI.
//!
//! The `CheckError` enum unifies transport, validation, configuration and I/O
//! failures so that every layer can propagate a single error type with `?`.
use std::io;

use thiserror::Error;

/// A ticker field (or comparison) that failed the structural contract.
///
/// The message always names the offending field, the method that produced
/// the ticker and the symbol it was fetched for.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[{exchange}] {method} {symbol}: field \"{field}\" {reason}")]
pub struct ValidationError {
    /// Exchange identifier of the client that produced the ticker.
    pub exchange: String,
    /// Client operation label, e.g. `fetchTicker`.
    pub method: String,
    /// Requested symbol, or the ticker's own symbol when none was requested.
    pub symbol: String,
    /// Wire name of the offending field or pseudo-property.
    pub field: String,
    /// Human-readable description of the failed expectation.
    pub reason: String,
}

/// Unified error type for the workspace.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The ticker does not conform to the structural contract.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The client failed to fetch data (network, protocol or exchange-side error).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The requested symbol is not listed by the client.
    #[error("Unknown symbol {symbol} on exchange {exchange}")]
    UnknownSymbol {
        /// Exchange identifier.
        exchange: String,
        /// Symbol as requested.
        symbol: String,
    },

    /// Text that cannot be parsed as a `BASE/QUOTE[:SETTLE]` symbol.
    #[error("Invalid trading symbol: {0}")]
    InvalidSymbol(String),

    /// Malformed configuration or recorded-response content.
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error originating from files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
