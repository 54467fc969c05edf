//! Trading service configuration
//!
//! Plain structs with defaults, deserializable from JSON. Decimal rates are
//! written as strings (`"rate": "1.25"`) to keep them exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use types::currency::{Currency, CurrencyPair};
use types::exchange::Exchange;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid admission range: min {min} is greater than max {max}")]
    InvalidAdmissionRange { min: i32, max: i32 },

    #[error("non-positive rate on exchange {exchange} for {pair}: {rate}")]
    NonPositiveRate {
        exchange: String,
        pair: CurrencyPair,
        rate: Decimal,
    },

    #[error("duplicate exchange in configuration: {name}")]
    DuplicateExchange { name: String },

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("failed to read configuration file: {0}")]
    Io(String),
}

/// Inclusive range the swap admission number must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRange {
    min: i32,
    max: i32,
}

impl AdmissionRange {
    pub const DEFAULT_MIN: i32 = 0;
    pub const DEFAULT_MAX: i32 = 25;

    /// Create a range; `min` must not exceed `max`.
    pub fn new(min: i32, max: i32) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidAdmissionRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, number: i32) -> bool {
        (self.min..=self.max).contains(&number)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Self::new(self.min, self.max).map(|_| ())
    }
}

impl Default for AdmissionRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// One rate table entry: `quote` units per one `base`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    pub base: Currency,
    pub quote: Currency,
    pub rate: Decimal,
}

/// Exchange seeded at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub name: String,
    #[serde(default)]
    pub rates: Vec<RateConfig>,
}

impl ExchangeConfig {
    /// Build the exchange with its rate table
    pub fn build(&self) -> Exchange {
        Exchange::with_rates(
            self.name.clone(),
            self.rates
                .iter()
                .map(|r| (CurrencyPair::new(r.base, r.quote), r.rate)),
        )
    }
}

/// Trading service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradingConfig {
    /// Accepted swap admission numbers
    #[serde(default)]
    pub admission: AdmissionRange,
    /// Exchanges managed from startup
    #[serde(default)]
    pub exchanges: Vec<ExchangeConfig>,
}

impl TradingConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TradingConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Check admission bounds, rate signs and exchange name uniqueness
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.admission.validate()?;

        let mut seen = std::collections::BTreeSet::new();
        for exchange in &self.exchanges {
            if !seen.insert(exchange.name.as_str()) {
                return Err(ConfigError::DuplicateExchange {
                    name: exchange.name.clone(),
                });
            }
            if let Some(bad) = exchange.rates.iter().find(|r| r.rate <= Decimal::ZERO) {
                return Err(ConfigError::NonPositiveRate {
                    exchange: exchange.name.clone(),
                    pair: CurrencyPair::new(bad.base, bad.quote),
                    rate: bad.rate,
                });
            }
        }
        Ok(())
    }
}
