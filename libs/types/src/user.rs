//! User identity, lifecycle status and owned wallets

use crate::currency::Currency;
use crate::ids::{UserId, WalletId};
use crate::wallet::Wallet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the wallet every user is created with
pub const DEFAULT_WALLET_NAME: &str = "newWallet";
/// Passphrase of the default wallet
pub const DEFAULT_WALLET_PASSPHRASE: &str = "newPass";
/// Currency seeded into the default wallet
pub const DEFAULT_WALLET_CURRENCY: Currency = Currency::BITCOIN;
/// Amount seeded into the default wallet
pub const DEFAULT_WALLET_SEED: u32 = 10;

/// User lifecycle status. Only `APPROVED` users may trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Registered, not yet reviewed
    NEW,
    /// Allowed to trade
    APPROVED,
    /// Trading disabled
    BLOCKED,
}

impl Status {
    pub fn can_trade(&self) -> bool {
        matches!(self, Status::APPROVED)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::NEW => "NEW",
            Status::APPROVED => "APPROVED",
            Status::BLOCKED => "BLOCKED",
        };
        f.write_str(label)
    }
}

/// A user and the wallets it owns.
///
/// The underlying wallet list keeps cold wallets; [`User::wallets`] is the
/// hot-only view and is recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Option<String>,
    pub full_name: String,
    pub status: Status,
    wallets: Vec<Wallet>,
}

impl User {
    /// Create a user holding one default wallet seeded with 10 BITCOIN.
    pub fn new(email: impl Into<String>, full_name: impl Into<String>, status: Status) -> Self {
        let mut user = Self {
            id: UserId::new(),
            email: Some(email.into()),
            full_name: full_name.into(),
            status,
            wallets: Vec::new(),
        };
        let default_wallet = Wallet::with_currencies(
            DEFAULT_WALLET_NAME,
            DEFAULT_WALLET_PASSPHRASE,
            user.id,
            [(DEFAULT_WALLET_CURRENCY, Decimal::from(DEFAULT_WALLET_SEED))],
        );
        user.wallets.push(default_wallet);
        user
    }

    /// Create a user with status `NEW`
    pub fn registered(email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self::new(email, full_name, Status::NEW)
    }

    /// Hot wallets only
    pub fn wallets(&self) -> Vec<&Wallet> {
        self.wallets.iter().filter(|w| !w.is_cold()).collect()
    }

    /// Every owned wallet, cold ones included
    pub fn all_wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn hot_wallet_count(&self) -> usize {
        self.wallets.iter().filter(|w| !w.is_cold()).count()
    }

    /// Look up an owned wallet, cold ones included
    pub fn wallet(&self, wallet_id: &WalletId) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == *wallet_id)
    }

    pub fn wallet_mut(&mut self, wallet_id: &WalletId) -> Option<&mut Wallet> {
        self.wallets.iter_mut().find(|w| w.id == *wallet_id)
    }

    /// Look up a wallet visible to trading (hot only)
    pub fn hot_wallet(&self, wallet_id: &WalletId) -> Option<&Wallet> {
        self.wallet(wallet_id).filter(|w| !w.is_cold())
    }

    pub fn hot_wallet_mut(&mut self, wallet_id: &WalletId) -> Option<&mut Wallet> {
        self.wallet_mut(wallet_id).filter(|w| !w.is_cold())
    }

    /// Merge a wallet into the owned set and take ownership of it.
    ///
    /// Returns `false` without changes if a wallet with the same id is
    /// already owned.
    pub fn add_wallet(&mut self, mut wallet: Wallet) -> bool {
        if self.wallet(&wallet.id).is_some() {
            return false;
        }
        wallet.owner = self.id;
        self.wallets.push(wallet);
        true
    }
}
