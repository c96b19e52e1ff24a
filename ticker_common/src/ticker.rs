//! Ticker record returned by exchange clients, and the names of its fields.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Snapshot of the current market state for one symbol.
///
/// Every field except `info` is optional so that a response with missing data
/// can still be represented and reported on by a validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    /// Unified symbol as reported by the exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// ISO-8601 rendering of `timestamp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Highest price over the period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    /// Lowest price over the period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    /// Best bid price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,
    /// Size available at the best bid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_volume: Option<f64>,
    /// Best ask price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<f64>,
    /// Size available at the best ask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask_volume: Option<f64>,
    /// Volume-weighted average price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vwap: Option<f64>,
    /// Opening price of the period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    /// Closing price; equals `last`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    /// Last traded price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<f64>,
    /// Close of the previous period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,
    /// Absolute change over the ticker period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    /// Relative change over the ticker period, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    /// Mean of `open` and `close`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    /// Traded volume in base currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_volume: Option<f64>,
    /// Traded volume in quote currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_volume: Option<f64>,
    /// Raw exchange payload the ticker was parsed from.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub info: serde_json::Value,
}

/// Validated ticker fields, displayed by their camelCase wire names.
#[allow(missing_docs)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum TickerField {
    Symbol,
    Timestamp,
    Datetime,
    High,
    Low,
    Bid,
    BidVolume,
    Ask,
    AskVolume,
    Vwap,
    Open,
    Close,
    Last,
    PreviousClose,
    Change,
    Percentage,
    Average,
    BaseVolume,
    QuoteVolume,
}

impl TickerField {
    /// Wire name of the field, e.g. `bidVolume`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether the field carries a floating-point value.
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            TickerField::Symbol | TickerField::Timestamp | TickerField::Datetime
        )
    }
}

impl Ticker {
    /// Value of a floating-point field; `None` for absent or non-numeric fields.
    pub fn numeric(&self, field: TickerField) -> Option<f64> {
        match field {
            TickerField::High => self.high,
            TickerField::Low => self.low,
            TickerField::Bid => self.bid,
            TickerField::BidVolume => self.bid_volume,
            TickerField::Ask => self.ask,
            TickerField::AskVolume => self.ask_volume,
            TickerField::Vwap => self.vwap,
            TickerField::Open => self.open,
            TickerField::Close => self.close,
            TickerField::Last => self.last,
            TickerField::PreviousClose => self.previous_close,
            TickerField::Change => self.change,
            TickerField::Percentage => self.percentage,
            TickerField::Average => self.average,
            TickerField::BaseVolume => self.base_volume,
            TickerField::QuoteVolume => self.quote_volume,
            TickerField::Symbol | TickerField::Timestamp | TickerField::Datetime => None,
        }
    }

    /// Whether the field holds a value.
    pub fn has(&self, field: TickerField) -> bool {
        match field {
            TickerField::Symbol => self.symbol.is_some(),
            TickerField::Timestamp => self.timestamp.is_some(),
            TickerField::Datetime => self.datetime.is_some(),
            numeric => self.numeric(numeric).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn deserializes_camel_case_payload() {
        let ticker: Ticker = serde_json::from_str(
            r#"{"symbol":"BTC/USDT","timestamp":1700000000000,"bid":100,"bidVolume":2.5,
                "ask":101,"last":100.5,"baseVolume":12.0,"info":{"raw":true}}"#,
        )
        .unwrap();

        assert_eq!(ticker.symbol.as_deref(), Some("BTC/USDT"));
        assert_eq!(ticker.timestamp, Some(1_700_000_000_000));
        assert_eq!(ticker.bid_volume, Some(2.5));
        assert_eq!(ticker.base_volume, Some(12.0));
        assert_eq!(ticker.high, None);
        assert_eq!(ticker.info["raw"], serde_json::Value::Bool(true));
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let ticker = Ticker {
            symbol: Some("BTC/USDT".into()),
            last: Some(1.0),
            ..Ticker::default()
        };
        assert_eq!(
            serde_json::to_string(&ticker).unwrap(),
            r#"{"symbol":"BTC/USDT","last":1.0}"#
        );
    }

    #[test]
    fn field_names_match_wire_names() {
        assert_eq!(TickerField::BidVolume.to_string(), "bidVolume");
        assert_eq!(TickerField::Vwap.name(), "vwap");
        assert_eq!(TickerField::PreviousClose.name(), "previousClose");
        assert_eq!("quoteVolume".parse::<TickerField>().unwrap(), TickerField::QuoteVolume);
        assert!("volume".parse::<TickerField>().is_err());
    }

    #[test]
    fn has_agrees_with_numeric_for_every_numeric_field() {
        let ticker = Ticker {
            high: Some(2.0),
            quote_volume: Some(0.0),
            ..Ticker::default()
        };
        for field in TickerField::iter().filter(|f| f.is_numeric()) {
            assert_eq!(ticker.has(field), ticker.numeric(field).is_some(), "{field}");
        }
        assert!(ticker.has(TickerField::High));
        assert!(!ticker.has(TickerField::Symbol));
    }
}
