//! Wallet balance ledger
//!
//! A wallet maps each currency to a decimal amount. It holds no transfer
//! logic: the trading service validates and mutates `currencies` directly.

use crate::currency::Currency;
use crate::ids::{UserId, WalletId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Add;

/// Named, ownership-tagged balance ledger.
///
/// Invariant: no balance is negative after a successful operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub name: String,
    /// Cold wallets stay stored but are hidden from balance and trade views
    pub cold: bool,
    pub passphrase: String,
    /// Owning user (back reference, the user owns the wallet)
    pub owner: UserId,
    pub currencies: BTreeMap<Currency, Decimal>,
}

impl Wallet {
    /// Create an empty hot wallet
    pub fn new(name: impl Into<String>, passphrase: impl Into<String>, owner: UserId) -> Self {
        Self {
            id: WalletId::new(),
            name: name.into(),
            cold: false,
            passphrase: passphrase.into(),
            owner,
            currencies: BTreeMap::new(),
        }
    }

    /// Create a hot wallet with initial balances
    pub fn with_currencies(
        name: impl Into<String>,
        passphrase: impl Into<String>,
        owner: UserId,
        currencies: impl IntoIterator<Item = (Currency, Decimal)>,
    ) -> Self {
        let mut wallet = Self::new(name, passphrase, owner);
        wallet.currencies.extend(currencies);
        wallet
    }

    /// Balance for a currency, zero if the wallet has no entry
    pub fn balance(&self, currency: Currency) -> Decimal {
        self.currencies
            .get(&currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Whether the wallet has an entry for the currency (even a zero one)
    pub fn holds(&self, currency: Currency) -> bool {
        self.currencies.contains_key(&currency)
    }

    pub fn is_cold(&self) -> bool {
        self.cold
    }

    /// Merge two wallets into a new one.
    ///
    /// Keeps this wallet's name, passphrase and owner; balances are summed
    /// per currency and the result gets a fresh id.
    pub fn merged(&self, other: &Wallet) -> Wallet {
        let mut currencies = self.currencies.clone();
        for (currency, amount) in &other.currencies {
            *currencies.entry(*currency).or_insert(Decimal::ZERO) += *amount;
        }
        Wallet {
            id: WalletId::new(),
            name: self.name.clone(),
            cold: false,
            passphrase: self.passphrase.clone(),
            owner: self.owner,
            currencies,
        }
    }
}

impl Add for &Wallet {
    type Output = Wallet;

    fn add(self, rhs: &Wallet) -> Wallet {
        self.merged(rhs)
    }
}
