//! Properties a caller exempts from validation for one exchange.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ticker::TickerField;

/// Pseudo-property disabling the `bid <= ask` comparison.
pub const SPREAD: &str = "spread";
/// Pseudo-property disabling the high/low envelope comparisons.
pub const COMPARE_OHLC: &str = "compareOHLC";

/// Read-only set of property names exempt from validation.
///
/// Holds ticker field wire names (`bidVolume`) and the pseudo-properties
/// [`SPREAD`] and [`COMPARE_OHLC`]. Names are matched exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkippedProperties(BTreeSet<String>);

impl SkippedProperties {
    /// An empty set: every property is validated.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether `name` is exempt.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Whether a ticker field is exempt.
    pub fn skips(&self, field: TickerField) -> bool {
        self.contains(field.name())
    }

    /// Names that are neither a ticker field nor a known pseudo-property.
    pub fn unknown(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .map(String::as_str)
            .filter(|name| *name != SPREAD && *name != COMPARE_OHLC)
            .filter(|name| name.parse::<TickerField>().is_err())
    }

    /// Iterates the names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of exempt names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is exempt.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkippedProperties {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
