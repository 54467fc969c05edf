//! Exchange venue: directed rate table and append-only history
//!
//! The exchange is a plain container. It does not validate rates or keep
//! the table symmetric; the trading service owns all checks.

use crate::currency::{Currency, CurrencyPair};
use crate::transaction::Transaction;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// Named venue holding a rate table and its settled transactions.
///
/// Two exchanges are the same venue when their names are equal.
#[derive(Debug, Clone)]
pub struct Exchange {
    name: String,
    rates: BTreeMap<CurrencyPair, Decimal>,
    history: Vec<Transaction>,
}

impl Exchange {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rates: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    /// Create an exchange with a pre-populated rate table
    pub fn with_rates(
        name: impl Into<String>,
        rates: impl IntoIterator<Item = (CurrencyPair, Decimal)>,
    ) -> Self {
        let mut exchange = Self::new(name);
        exchange.rates.extend(rates);
        exchange
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the rate for `(base, quote)`: `quote` units per one `base`.
    ///
    /// Returns the previous rate, if any.
    pub fn set_rate(&mut self, base: Currency, quote: Currency, rate: Decimal) -> Option<Decimal> {
        self.rates.insert(CurrencyPair::new(base, quote), rate)
    }

    pub fn remove_rate(&mut self, base: Currency, quote: Currency) -> Option<Decimal> {
        self.rates.remove(&CurrencyPair::new(base, quote))
    }

    pub fn rate(&self, pair: &CurrencyPair) -> Option<Decimal> {
        self.rates.get(pair).copied()
    }

    pub fn has_rate(&self, pair: &CurrencyPair) -> bool {
        self.rates.contains_key(pair)
    }

    pub fn rates(&self) -> &BTreeMap<CurrencyPair, Decimal> {
        &self.rates
    }

    /// Settled transactions, oldest first
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    /// Append a settled transaction to the history
    pub fn record(&mut self, transaction: Transaction) {
        self.history.push(transaction);
    }

    /// Append several transactions in order
    pub fn record_all(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.history.extend(transactions);
    }
}

impl PartialEq for Exchange {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Exchange {}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "This is exchange with name {}", self.name)
    }
}
