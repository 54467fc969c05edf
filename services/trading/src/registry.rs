//! Account registry — users, wallet index and status observers
//!
//! Users own their wallets. The registry indexes every wallet id to its
//! owner so operations can address wallets by id. Trading only ever sees
//! hot wallets; cold ones stay stored and reachable through [`AccountRegistry::wallet`].

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};
use types::currency::Currency;
use types::errors::TradingError;
use types::ids::{UserId, WalletId};
use types::user::{Status, User};
use types::wallet::Wallet;

use crate::observer::StatusObserver;

/// In-memory directory of users and their wallets
#[derive(Default)]
pub struct AccountRegistry {
    users: HashMap<UserId, User>,
    /// wallet -> owning user
    wallet_owners: HashMap<WalletId, UserId>,
    observers: Vec<Box<dyn StatusObserver>>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and index every wallet it owns.
    ///
    /// A user with the same id is replaced.
    pub fn add_user(&mut self, user: User) -> UserId {
        let user_id = user.id;
        if let Some(previous) = self.users.remove(&user_id) {
            for wallet in previous.all_wallets() {
                self.wallet_owners.remove(&wallet.id);
            }
        }
        for wallet in user.all_wallets() {
            self.wallet_owners.insert(wallet.id, user_id);
        }
        debug!(user_id = %user_id, wallets = user.all_wallets().len(), "User registered");
        self.users.insert(user_id, user);
        user_id
    }

    pub fn user(&self, user_id: &UserId) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Users holding more than `min` hot wallets
    pub fn users_with_wallet_count_above(&self, min: usize) -> Vec<&User> {
        self.users
            .values()
            .filter(|u| u.hot_wallet_count() > min)
            .collect()
    }

    /// Associate a wallet with a user; the wallet's owner becomes that user.
    ///
    /// Wallet ids are unique across the registry. Adding a wallet the user
    /// already owns is a no-op; adding one owned by another user fails with
    /// `WalletAlreadyRegistered` and changes nothing.
    pub fn add_wallet(&mut self, user_id: UserId, wallet: Wallet) -> Result<WalletId, TradingError> {
        let wallet_id = wallet.id;
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or(TradingError::UserNotFound { user_id })?;

        match self.wallet_owners.get(&wallet_id) {
            Some(owner) if *owner == user_id => {
                debug!(wallet_id = %wallet_id, "Wallet already owned by user");
                return Ok(wallet_id);
            }
            Some(owner) => {
                return Err(TradingError::WalletAlreadyRegistered {
                    wallet_id,
                    owner: *owner,
                });
            }
            None => {}
        }

        if user.add_wallet(wallet) {
            self.wallet_owners.insert(wallet_id, user_id);
            debug!(user_id = %user_id, wallet_id = %wallet_id, "Wallet added");
        }
        Ok(wallet_id)
    }

    /// Any owned wallet, cold ones included
    pub fn wallet(&self, wallet_id: &WalletId) -> Option<&Wallet> {
        let owner = self.wallet_owners.get(wallet_id)?;
        self.users.get(owner)?.wallet(wallet_id)
    }

    /// A wallet visible to trading, with its owner
    pub fn resolve_hot(&self, wallet_id: &WalletId) -> Result<(&Wallet, &User), TradingError> {
        let not_found = || TradingError::WalletNotFound {
            wallet_id: *wallet_id,
        };
        let owner_id = self.wallet_owners.get(wallet_id).ok_or_else(not_found)?;
        let owner = self.users.get(owner_id).ok_or_else(not_found)?;
        let wallet = owner.hot_wallet(wallet_id).ok_or_else(not_found)?;
        Ok((wallet, owner))
    }

    pub fn hot_wallet_mut(&mut self, wallet_id: &WalletId) -> Option<&mut Wallet> {
        let owner = self.wallet_owners.get(wallet_id)?;
        self.users.get_mut(owner)?.hot_wallet_mut(wallet_id)
    }

    /// Overwrite one balance of a hot wallet
    pub(crate) fn set_balance(
        &mut self,
        wallet_id: &WalletId,
        currency: Currency,
        amount: Decimal,
    ) -> Result<(), TradingError> {
        let wallet = self
            .hot_wallet_mut(wallet_id)
            .ok_or(TradingError::WalletNotFound {
                wallet_id: *wallet_id,
            })?;
        wallet.currencies.insert(currency, amount);
        Ok(())
    }

    /// Freeze or unfreeze a wallet
    pub fn set_wallet_cold(&mut self, wallet_id: &WalletId, cold: bool) -> Result<(), TradingError> {
        let not_found = TradingError::WalletNotFound {
            wallet_id: *wallet_id,
        };
        let owner = self.wallet_owners.get(wallet_id).ok_or(not_found.clone())?;
        let wallet = self
            .users
            .get_mut(owner)
            .and_then(|u| u.wallet_mut(wallet_id))
            .ok_or(not_found)?;
        wallet.cold = cold;
        Ok(())
    }

    // ───────────────────────── Status ─────────────────────────

    /// Register an observer; observers are notified in registration order.
    pub fn register_observer(&mut self, observer: Box<dyn StatusObserver>) {
        debug!(observer = observer.name(), "Status observer registered");
        self.observers.push(observer);
    }

    /// Change a user's status and notify observers.
    ///
    /// Returns `true` if the status changed. Setting the current status again
    /// is a no-op and notifies nobody.
    pub fn set_status(&mut self, user_id: &UserId, status: Status) -> Result<bool, TradingError> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or(TradingError::UserNotFound { user_id: *user_id })?;
        if user.status == status {
            return Ok(false);
        }

        let previous = user.status;
        user.status = status;
        info!(user_id = %user_id, from = %previous, to = %status, "User status changed");

        let user = &self.users[user_id];
        for observer in &self.observers {
            if let Err(err) = observer.on_status_changed(user) {
                warn!(
                    observer = observer.name(),
                    user_id = %user_id,
                    error = %err,
                    "Status observer failed"
                );
            }
        }
        Ok(true)
    }
}

impl fmt::Debug for AccountRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountRegistry")
            .field("users", &self.users.len())
            .field("wallets", &self.wallet_owners.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
