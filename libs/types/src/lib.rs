//! Types library for the multi-currency wallet exchange
//!
//! This library provides the domain types shared by the trading services:
//! currencies, wallets, users, exchanges and the settled transaction
//! records, plus the error taxonomy.
//!
//! # Modules
//! - `ids`: Unique identifiers (UserId, WalletId, TransactionId)
//! - `currency`: Currency enum and directed currency pairs
//! - `numeric`: Quoted-amount rounding (2 dp, HALF_UP)
//! - `wallet`: Wallet balance ledger
//! - `user`: User identity, status and owned wallets
//! - `exchange`: Rate table and append-only history
//! - `transaction`: Trade and swap records
//! - `errors`: Error taxonomy

pub mod ids;
pub mod currency;
pub mod numeric;
pub mod wallet;
pub mod user;
pub mod exchange;
pub mod transaction;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::currency::*;
    pub use crate::numeric::*;
    pub use crate::wallet::*;
    pub use crate::user::*;
    pub use crate::exchange::*;
    pub use crate::transaction::*;
    pub use crate::errors::*;
}
