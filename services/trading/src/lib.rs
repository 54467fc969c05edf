//! Trading Service
//!
//! Trade and swap execution over user wallets and exchange rate tables.
//!
//! **Key Invariants:**
//! - Every check runs before any mutation; a failed call changes nothing
//! - A settled operation moves exactly `from_amount` out and the quoted
//!   amount in, and appends one history record
//! - Quoted amounts are rounded once, to 2 dp half-up
//! - One exclusive borrow (or the desk lock) spans each whole operation

pub mod config;
pub mod observer;
pub mod registry;
pub mod trading;
pub mod personal_account;
pub mod desk;

pub use config::{AdmissionRange, ConfigError, TradingConfig};
pub use desk::TradingDesk;
pub use personal_account::PersonalAccountService;
pub use registry::AccountRegistry;
pub use trading::{SwapRequest, TradeRequest, TradingService};
