//! End-to-end behaviour of the `fetchTicker` conformance check.
//!
//! Covers:
//! - conforming tickers pass, missing fields fail unless skipped
//! - transport and validation failures propagate unchanged
//! - the requested symbol reaches both the fetch and the validator untouched
//! - repeated checks give the same answer

use std::sync::Mutex;

use proptest::prelude::*;
use ticker_common::check::FETCH_TICKER;
use ticker_common::{
    CheckError, RecordedClient, SkipConfig, SkippedProperties, Ticker, TickerClient,
    TickerConformanceCheck, TickerSchema, TickerValidator, TradingSymbol, ValidationError,
    check_fetch_ticker,
};

fn btc() -> TradingSymbol {
    "BTC/USDT".parse().unwrap()
}

fn sample() -> Ticker {
    serde_json::from_str(
        r#"{"symbol":"BTC/USDT","bid":100,"ask":101,"last":100.5,"timestamp":1700000000000}"#,
    )
    .unwrap()
}

fn skip(names: &[&str]) -> SkippedProperties {
    names.iter().copied().collect()
}

fn check(ticker: Ticker, skipped: &SkippedProperties) -> Result<bool, CheckError> {
    let client = RecordedClient::new("testex").with_ticker(btc(), ticker);
    check_fetch_ticker(&client, &TickerSchema::new(), skipped, &btc())
}

// ── Stubs
// ─────────────────────────────────────────────────────────────────────

/// Client that records which symbols it was asked for.
struct SpyClient {
    ticker: Ticker,
    fetched: Mutex<Vec<TradingSymbol>>,
}

impl TickerClient for SpyClient {
    fn id(&self) -> &str {
        "spy"
    }

    fn has_symbol(&self, _symbol: &TradingSymbol) -> bool {
        true
    }

    fn fetch_ticker(&self, symbol: &TradingSymbol) -> Result<Ticker, CheckError> {
        self.fetched.lock().unwrap().push(symbol.clone());
        Ok(self.ticker.clone())
    }
}

/// Validator that records its arguments and accepts everything.
#[derive(Default)]
struct SpyValidator {
    calls: Mutex<Vec<(String, String, Option<TradingSymbol>)>>,
}

impl TickerValidator for SpyValidator {
    fn validate_ticker(
        &self,
        client: &dyn TickerClient,
        _skipped: &SkippedProperties,
        method: &str,
        _ticker: &Ticker,
        symbol: Option<&TradingSymbol>,
    ) -> Result<(), ValidationError> {
        self.calls.lock().unwrap().push((
            client.id().to_string(),
            method.to_string(),
            symbol.cloned(),
        ));
        Ok(())
    }
}

/// Validator that always rejects with a fixed error.
struct RejectingValidator(ValidationError);

impl TickerValidator for RejectingValidator {
    fn validate_ticker(
        &self,
        _client: &dyn TickerClient,
        _skipped: &SkippedProperties,
        _method: &str,
        _ticker: &Ticker,
        _symbol: Option<&TradingSymbol>,
    ) -> Result<(), ValidationError> {
        Err(self.0.clone())
    }
}

// ── Scenarios
// ─────────────────────────────────────────────────────────────────

#[test]
fn conforming_ticker_returns_true() {
    assert!(check(sample(), &SkippedProperties::none()).unwrap());
}

#[test]
fn missing_ask_is_reported() {
    let mut ticker = sample();
    ticker.ask = None;

    let err = check(ticker, &SkippedProperties::none()).unwrap_err();
    match err {
        CheckError::Validation(e) => {
            assert_eq!(e.field, "ask");
            assert_eq!(e.method, FETCH_TICKER);
            assert_eq!(e.symbol, "BTC/USDT");
            assert!(e.to_string().contains("ask"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn missing_ask_passes_when_skipped() {
    let mut ticker = sample();
    ticker.ask = None;
    assert!(check(ticker, &skip(&["ask"])).unwrap());
}

#[test]
fn bundled_check_uses_default_schema() {
    let client = RecordedClient::new("testex").with_ticker(btc(), sample());
    let check = TickerConformanceCheck::new();
    assert!(check.run(&client, &SkippedProperties::none(), &btc()).unwrap());
}

#[test]
fn recorded_fixture_with_skip_config() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
    let client = RecordedClient::from_path(root.join("binance.json")).unwrap();
    let config = SkipConfig::from_path(root.join("skip.json")).unwrap();
    let skipped = config.skipped_for(client.id());
    let check = TickerConformanceCheck::new();

    let run = |s: &str| check.run(&client, &skipped, &s.parse().unwrap());
    assert!(run("BTC/USDT").unwrap());
    assert!(run("DOGE/USDT").unwrap());
    assert!(matches!(run("ETH/USDT"), Err(CheckError::Validation(ref e)) if e.field == "ask"));
    assert!(matches!(run("SOL/USDT"), Err(CheckError::Transport(_))));
}

// ── Propagation
// ───────────────────────────────────────────────────────────────

#[test]
fn unlisted_symbol_fails_before_fetching() {
    let client = RecordedClient::new("testex");
    let validator = SpyValidator::default();

    let err = check_fetch_ticker(&client, &validator, &SkippedProperties::none(), &btc())
        .unwrap_err();
    assert!(matches!(
        err,
        CheckError::UnknownSymbol { ref exchange, ref symbol } if exchange == "testex" && symbol == "BTC/USDT"
    ));
    assert!(validator.calls.lock().unwrap().is_empty());
}

#[test]
fn transport_error_propagates_unchanged() {
    let client = RecordedClient::new("testex").with_error(btc(), "502 Bad Gateway");
    let validator = SpyValidator::default();

    let err = check_fetch_ticker(&client, &validator, &SkippedProperties::none(), &btc())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Transport error: testex fetchTicker BTC/USDT: 502 Bad Gateway"
    );
    assert!(validator.calls.lock().unwrap().is_empty());
}

#[test]
fn validator_error_propagates_unchanged() {
    let rejection = ValidationError {
        exchange: "x".into(),
        method: "m".into(),
        symbol: "s".into(),
        field: "vwap".into(),
        reason: "is odd".into(),
    };
    let client = RecordedClient::new("testex").with_ticker(btc(), sample());
    let check = TickerConformanceCheck::with_validator(RejectingValidator(rejection.clone()));

    match check.run(&client, &SkippedProperties::none(), &btc()) {
        Err(CheckError::Validation(e)) => assert_eq!(e, rejection),
        other => panic!("expected the validator's error, got {other:?}"),
    }
}

#[test]
fn symbol_reaches_fetch_and_validator_untouched() {
    let symbol: TradingSymbol = "ETH/USDT:USDT".parse().unwrap();
    let client = SpyClient {
        ticker: Ticker::default(),
        fetched: Mutex::new(Vec::new()),
    };
    let validator = SpyValidator::default();

    assert!(check_fetch_ticker(&client, &validator, &SkippedProperties::none(), &symbol).unwrap());

    assert_eq!(*client.fetched.lock().unwrap(), vec![symbol.clone()]);
    assert_eq!(
        *validator.calls.lock().unwrap(),
        vec![("spy".to_string(), FETCH_TICKER.to_string(), Some(symbol))]
    );
}

// ── Properties
// ────────────────────────────────────────────────────────────────

fn field_strat() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["symbol", "timestamp", "bid", "ask", "last"])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any ticker with positive bid <= ask and in-range timestamp passes,
    /// and passes again on a second run.
    #[test]
    fn conforming_tickers_pass_repeatedly(
        bid in 1u32..100_000,
        spread in 0u32..1_000,
        ts in 1_230_940_800_000i64..2_147_483_648_000,
    ) {
        let ticker = Ticker {
            symbol: Some("BTC/USDT".into()),
            timestamp: Some(ts),
            bid: Some(f64::from(bid)),
            ask: Some(f64::from(bid + spread)),
            last: Some(f64::from(bid)),
            ..Ticker::default()
        };
        let client = RecordedClient::new("testex").with_ticker(btc(), ticker);
        let skipped = SkippedProperties::none();
        prop_assert!(check_fetch_ticker(&client, &TickerSchema::new(), &skipped, &btc()).unwrap());
        prop_assert!(check_fetch_ticker(&client, &TickerSchema::new(), &skipped, &btc()).unwrap());
    }

    /// Removing a required field fails naming it; skipping it passes.
    #[test]
    fn missing_required_field_fails_unless_skipped(field in field_strat()) {
        let mut ticker = sample();
        match field {
            "symbol" => ticker.symbol = None,
            "timestamp" => ticker.timestamp = None,
            "bid" => ticker.bid = None,
            "ask" => ticker.ask = None,
            _ => ticker.last = None,
        }

        let first = check(ticker.clone(), &SkippedProperties::none()).unwrap_err();
        let second = check(ticker.clone(), &SkippedProperties::none()).unwrap_err();
        prop_assert_eq!(first.to_string(), second.to_string());
        match first {
            CheckError::Validation(e) => prop_assert_eq!(e.field, field),
            other => prop_assert!(false, "unexpected error {}", other),
        }
        prop_assert!(check(ticker, &skip(&[field])).unwrap());
    }
}
