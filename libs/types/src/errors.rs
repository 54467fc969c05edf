//! Error types for trade and swap execution
//!
//! Comprehensive error taxonomy using thiserror. Every variant is a
//! validation failure: nothing here is transient or worth retrying.

use crate::currency::Currency;
use crate::ids::{UserId, WalletId};
use crate::user::Status;
use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level trading error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradingError {
    #[error("User status is {status}")]
    UserStatus { status: Status },

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("The exchange does not carry out transactions for {from} -> {to}")]
    NoSuitableExchange { from: Currency, to: Currency },

    #[error("Wrong passphrase")]
    WrongPassphrase,

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("Wallet not found: {wallet_id}")]
    WalletNotFound { wallet_id: WalletId },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: UserId },

    #[error("Wallet {wallet_id} already belongs to user {owner}")]
    WalletAlreadyRegistered { wallet_id: WalletId, owner: UserId },

    #[error("Exchange not found: {name}")]
    ExchangeNotFound { name: String },
}

/// Wallet balance errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("No such currency in wallet: {currency}")]
    NoSuchCurrency { currency: Currency },

    #[error("Not enough money on balance for {currency}: required {required}, available {available}")]
    NotEnoughMoney {
        currency: Currency,
        required: Decimal,
        available: Decimal,
    },
}

/// Transaction-level failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransactionError {
    #[error("Transaction failed: admission number {number} outside [{min}, {max}]")]
    AdmissionRejected { number: i32, min: i32, max: i32 },

    #[error("Transaction failed: amount must not be negative, got {amount}")]
    InvalidAmount { amount: Decimal },

    #[error("Transaction failed: rate for {pair} must be positive, got {rate}")]
    InvalidRate { pair: String, rate: Decimal },

    #[error("Transaction failed: arithmetic overflow in balance calculation")]
    Overflow,
}
