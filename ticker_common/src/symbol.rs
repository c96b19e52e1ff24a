//! Trading-pair symbols in unified `BASE/QUOTE[:SETTLE]` form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CheckError;

/// Identifier of a tradable market, e.g. `BTC/USDT` or `BTC/USDT:USDT`.
///
/// The settle part is present for derivatives and may carry an expiry suffix
/// (`BTC/USD:BTC-240329`). Displays back to exactly the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingSymbol {
    base: String,
    quote: String,
    settle: Option<String>,
}

impl TradingSymbol {
    /// Builds a spot symbol from its two legs.
    pub fn spot(base: &str, quote: &str) -> Result<Self, CheckError> {
        format!("{}/{}", base, quote).parse()
    }

    /// Base asset code.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Quote asset code.
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Settle part for derivatives markets.
    pub fn settle(&self) -> Option<&str> {
        self.settle.as_deref()
    }
}

fn is_asset_code(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

fn is_settle_code(part: &str) -> bool {
    let mut pieces = part.split('-');
    pieces.next().is_some_and(is_asset_code)
        && pieces.all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()))
}

impl FromStr for TradingSymbol {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CheckError::InvalidSymbol(s.to_string());

        let (pair, settle) = match s.split_once(':') {
            Some((pair, settle)) => {
                if !is_settle_code(settle) {
                    return Err(invalid());
                }
                (pair, Some(settle.to_string()))
            }
            None => (s, None),
        };
        let (base, quote) = pair.split_once('/').ok_or_else(invalid)?;
        if !is_asset_code(base) || !is_asset_code(quote) {
            return Err(invalid());
        }

        Ok(TradingSymbol {
            base: base.to_string(),
            quote: quote.to_string(),
            settle,
        })
    }
}

impl fmt::Display for TradingSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)?;
        if let Some(settle) = &self.settle {
            write!(f, ":{}", settle)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for TradingSymbol {
    type Error = CheckError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TradingSymbol> for String {
    fn from(value: TradingSymbol) -> Self {
        value.to_string()
    }
}
