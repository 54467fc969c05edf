//! Currencies and directed currency pairs
//!
//! A `CurrencyPair` is the key of an exchange rate table. The rate stored for
//! `(base, quote)` is the number of `quote` units paid for one `base` unit,
//! so converting *from* `F` *to* `T` looks up the pair `(T, F)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tradable currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    BITCOIN,
    ETHEREUM,
    TON,
}

impl Currency {
    /// All supported currencies, in declaration order
    pub const ALL: [Currency; 3] = [Currency::BITCOIN, Currency::ETHEREUM, Currency::TON];

    /// Ticker symbol
    pub fn ticker(&self) -> &'static str {
        match self {
            Currency::BITCOIN => "BTC",
            Currency::ETHEREUM => "ETH",
            Currency::TON => "TON",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

/// Ordered (base, quote) pair used as a rate table key.
///
/// The table is asymmetric: `(A, B)` says nothing about `(B, A)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Key for converting `from` into `to`: the (to, from) pair.
    pub fn for_conversion(from: Currency, to: Currency) -> Self {
        Self::new(to, from)
    }

    /// The opposite direction of this pair
    pub fn reversed(&self) -> Self {
        Self::new(self.quote, self.base)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl From<(Currency, Currency)> for CurrencyPair {
    fn from((base, quote): (Currency, Currency)) -> Self {
        Self::new(base, quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_key_is_to_from() {
        let pair = CurrencyPair::for_conversion(Currency::BITCOIN, Currency::ETHEREUM);
        assert_eq!(pair.base, Currency::ETHEREUM);
        assert_eq!(pair.quote, Currency::BITCOIN);
    }

    #[test]
    fn test_reversed() {
        let pair = CurrencyPair::new(Currency::BITCOIN, Currency::ETHEREUM);
        assert_eq!(
            pair.reversed(),
            CurrencyPair::new(Currency::ETHEREUM, Currency::BITCOIN)
        );
        assert_eq!(pair.reversed().reversed(), pair);
    }

    #[test]
    fn test_pair_display() {
        let pair = CurrencyPair::new(Currency::ETHEREUM, Currency::BITCOIN);
        assert_eq!(pair.to_string(), "ETH/BTC");
    }

    #[test]
    fn test_currency_serialization() {
        let json = serde_json::to_string(&Currency::TON).unwrap();
        assert_eq!(json, "\"TON\"");
        let back: Currency = serde_json::from_str("\"ETHEREUM\"").unwrap();
        assert_eq!(back, Currency::ETHEREUM);
    }
}
