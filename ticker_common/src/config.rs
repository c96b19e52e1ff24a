//! Per-exchange skip configuration.
//!
//! A JSON document keyed by exchange id:
//!
//! ```json
//! {
//!   "binance": { "skipProperties": ["bidVolume", "askVolume"] },
//!   "legacyex": { "skip": true }
//! }
//! ```
//!
//! `skip` disables every check for the exchange; `skipProperties` lists the
//! properties exempt from validation.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::error::CheckError;
use crate::result::Result;
use crate::skipped::SkippedProperties;

/// Settings for one exchange.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExchangeSkips {
    /// Disables every check for the exchange.
    #[serde(default)]
    pub skip: bool,
    /// Properties exempt from validation.
    #[serde(default)]
    pub skip_properties: SkippedProperties,
}

/// Skip settings for every configured exchange.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SkipConfig {
    exchanges: BTreeMap<String, ExchangeSkips>,
}

impl SkipConfig {
    /// Parses a configuration document.
    ///
    /// Unknown property names are kept but reported with a warning, since they
    /// usually mean a typo that silently exempts nothing.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: SkipConfig = serde_json::from_reader(reader)?;
        if let Some(id) = config.exchanges.keys().find(|id| id.trim().is_empty()) {
            return Err(CheckError::Config(format!("invalid exchange id {:?}", id)));
        }
        for (id, skips) in &config.exchanges {
            for name in skips.skip_properties.unknown() {
                warn!("[{}] skipProperties contains unknown property \"{}\"", id, name);
            }
        }
        info!("Loaded skip settings for {} exchanges", config.exchanges.len());
        Ok(config)
    }

    /// Opens and parses a configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Whether every check is disabled for exchange `id`.
    pub fn is_skipped(&self, id: &str) -> bool {
        self.exchanges.get(id).is_some_and(|e| e.skip)
    }

    /// Properties exempt for exchange `id`; empty when it is not configured.
    pub fn skipped_for(&self, id: &str) -> SkippedProperties {
        self.exchanges
            .get(id)
            .map(|e| e.skip_properties.clone())
            .unwrap_or_default()
    }
}
