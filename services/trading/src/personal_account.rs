//! Personal account service — read side over wallets and exchange history

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;
use types::currency::Currency;
use types::errors::{TradingError, TransactionError};
use types::exchange::Exchange;
use types::ids::{UserId, WalletId};
use types::transaction::Transaction;
use types::user::User;
use types::wallet::Wallet;

use crate::registry::AccountRegistry;

/// Balance sums, history filters and wallet association
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalAccountService;

impl PersonalAccountService {
    pub fn new() -> Self {
        Self
    }

    /// Per-currency sum across `wallets`
    pub fn get_balance(&self, wallets: &[&Wallet]) -> Result<BTreeMap<Currency, Decimal>, TradingError> {
        let mut totals: BTreeMap<Currency, Decimal> = BTreeMap::new();
        for wallet in wallets {
            for (currency, amount) in &wallet.currencies {
                let total = totals.entry(*currency).or_insert(Decimal::ZERO);
                *total = total
                    .checked_add(*amount)
                    .ok_or(TransactionError::Overflow)?;
            }
        }
        Ok(totals)
    }

    /// Balance over every hot wallet of a registered user
    pub fn get_user_balance(
        &self,
        registry: &AccountRegistry,
        user_id: &UserId,
    ) -> Result<BTreeMap<Currency, Decimal>, TradingError> {
        let user = registry
            .user(user_id)
            .ok_or(TradingError::UserNotFound { user_id: *user_id })?;
        self.get_balance(&user.wallets())
    }

    /// Transactions initiated by `user` strictly between `from` and `to`,
    /// in history order.
    pub fn get_transactions_for_period<'a>(
        &self,
        user: &User,
        exchange: &'a Exchange,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<&'a Transaction> {
        let found: Vec<&Transaction> = exchange
            .history()
            .iter()
            .filter(|tx| tx.created_at() > from && tx.created_at() < to)
            .filter(|tx| tx.initiator().owner_id == user.id)
            .collect();
        debug!(
            user_id = %user.id,
            exchange = exchange.name(),
            found = found.len(),
            "Transactions for period"
        );
        found
    }

    /// Associate `wallet` with the user; its owner becomes that user
    pub fn add_wallet(
        &self,
        registry: &mut AccountRegistry,
        user_id: UserId,
        wallet: Wallet,
    ) -> Result<WalletId, TradingError> {
        registry.add_wallet(user_id, wallet)
    }
}
