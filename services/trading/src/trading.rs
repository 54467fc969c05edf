//! Trading service — trade and swap execution
//!
//! Validates a request against wallet balances and an exchange's rate
//! table, then moves the funds and appends the settled transaction to that
//! exchange's history.
//!
//! Every check runs before any mutation, in a fixed order, and the first
//! failure is returned. A failed call leaves wallets and history untouched.
//!
//! Both operations take `&mut self` and `&mut AccountRegistry`: one call
//! holds exclusive access for the whole validate-then-mutate sequence. Use
//! [`crate::desk::TradingDesk`] to share a service across threads.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use types::currency::{Currency, CurrencyPair};
use types::errors::{TradingError, TransactionError, WalletError};
use types::exchange::Exchange;
use types::ids::WalletId;
use types::numeric::quote_amount;
use types::transaction::{SwapTransaction, TradeTransaction, Transaction, WalletRef};
use types::user::User;
use types::wallet::Wallet;

use crate::config::{AdmissionRange, ConfigError, TradingConfig};
use crate::registry::AccountRegistry;

/// Peer-to-peer conversion: debit `initiator`, credit `receiver`
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    pub initiator: WalletId,
    pub receiver: WalletId,
    pub from_currency: Currency,
    pub from_amount: Decimal,
    pub to_currency: Currency,
}

/// Same-wallet conversion gated by passphrase and admission number
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub wallet: WalletId,
    pub passphrase: String,
    pub from_currency: Currency,
    pub from_amount: Decimal,
    pub to_currency: Currency,
    pub admission_number: i32,
}

/// Balances to write once every check has passed
#[derive(Debug, Clone, Copy)]
struct TransferPlan {
    debit_wallet: WalletId,
    debit_currency: Currency,
    debit_balance: Decimal,
    credit_wallet: WalletId,
    credit_currency: Currency,
    credit_balance: Decimal,
}

/// Trade/swap executor over a managed set of exchanges
#[derive(Debug, Clone, Default)]
pub struct TradingService {
    admission: AdmissionRange,
    /// Managed exchanges keyed by name
    exchanges: BTreeMap<String, Exchange>,
}

impl TradingService {
    /// Create a service with the default admission range and no exchanges
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admission(admission: AdmissionRange) -> Self {
        Self {
            admission,
            exchanges: BTreeMap::new(),
        }
    }

    /// Build a service from a validated configuration
    pub fn from_config(config: &TradingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut service = Self::with_admission(config.admission);
        for exchange in &config.exchanges {
            service.add_exchange(exchange.build());
        }
        Ok(service)
    }

    pub fn admission(&self) -> AdmissionRange {
        self.admission
    }

    // ───────────────────────── Exchanges ─────────────────────────

    /// Add an exchange to the managed set.
    ///
    /// Set semantics by name: returns `false` and keeps the existing
    /// exchange if one with the same name is already managed.
    pub fn add_exchange(&mut self, exchange: Exchange) -> bool {
        if self.exchanges.contains_key(exchange.name()) {
            debug!(exchange = exchange.name(), "Exchange already managed");
            return false;
        }
        info!(
            exchange = exchange.name(),
            rates = exchange.rates().len(),
            "Exchange added"
        );
        self.exchanges.insert(exchange.name().to_string(), exchange);
        true
    }

    pub fn exchange(&self, name: &str) -> Option<&Exchange> {
        self.exchanges.get(name)
    }

    /// Mutable access for rate maintenance
    pub fn exchange_mut(&mut self, name: &str) -> Option<&mut Exchange> {
        self.exchanges.get_mut(name)
    }

    /// Managed exchanges ordered by name
    pub fn exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.values()
    }

    /// Managed exchanges quoting the `(to_currency, from_currency)` pair
    pub fn available_exchanges(&self, to_currency: Currency, from_currency: Currency) -> Vec<&Exchange> {
        let pair = CurrencyPair::new(to_currency, from_currency);
        self.exchanges
            .values()
            .filter(|e| e.has_rate(&pair))
            .collect()
    }

    // ───────────────────────── Trade ─────────────────────────

    /// Convert `from_amount` of the initiator's `from_currency` into
    /// `to_currency` credited to the receiver, at `exchange`'s rate.
    ///
    /// Checks, in order:
    /// 1. Both owners are APPROVED
    /// 2. Amount is not negative and the initiator holds enough `from_currency`
    /// 3. The exchange quotes `(to_currency, from_currency)`
    pub fn trade_transaction(
        &mut self,
        registry: &mut AccountRegistry,
        request: &TradeRequest,
        exchange: &str,
    ) -> Result<Transaction, TradingError> {
        let result = self.execute_trade(registry, request, exchange);
        if let Err(err) = &result {
            warn!(
                initiator = %request.initiator,
                receiver = %request.receiver,
                from = %request.from_currency,
                to = %request.to_currency,
                amount = %request.from_amount,
                exchange,
                error = %err,
                "Trade rejected"
            );
        }
        result
    }

    fn execute_trade(
        &mut self,
        registry: &mut AccountRegistry,
        request: &TradeRequest,
        exchange_name: &str,
    ) -> Result<Transaction, TradingError> {
        let (initiator, initiator_owner) = registry.resolve_hot(&request.initiator)?;
        let (receiver, receiver_owner) = registry.resolve_hot(&request.receiver)?;
        let exchange = self
            .exchanges
            .get_mut(exchange_name)
            .ok_or_else(|| TradingError::ExchangeNotFound {
                name: exchange_name.to_string(),
            })?;

        check_user_status(initiator_owner)?;
        check_user_status(receiver_owner)?;
        check_balance(initiator, request.from_currency, request.from_amount)?;
        let rate = lookup_rate(exchange, request.from_currency, request.to_currency)?;
        let to_amount = quote(request.from_currency, request.to_currency, request.from_amount, rate)?;

        let plan = plan_transfer(
            initiator,
            receiver,
            request.from_currency,
            request.from_amount,
            request.to_currency,
            to_amount,
        )?;
        let transaction: Transaction = TradeTransaction::new(
            WalletRef::from(initiator),
            WalletRef::from(receiver),
            request.from_currency,
            request.from_amount,
            request.to_currency,
            to_amount,
        )
        .into();

        commit(registry, plan)?;
        exchange.record(transaction.clone());

        info!(
            transaction_id = %transaction.id(),
            kind = transaction.kind_label(),
            exchange = exchange_name,
            from = %request.from_currency,
            from_amount = %request.from_amount,
            to = %request.to_currency,
            to_amount = %to_amount,
            rate = %rate,
            "Trade settled"
        );
        Ok(transaction)
    }

    // ───────────────────────── Swap ─────────────────────────

    /// Convert within one wallet, gated by passphrase and admission number.
    ///
    /// Checks, in order:
    /// 1. Amount is not negative and the wallet holds enough `from_currency`
    /// 2. Passphrase matches exactly
    /// 3. Admission number lies in the configured range
    /// 4. The exchange quotes `(to_currency, from_currency)`
    pub fn swap_transaction(
        &mut self,
        registry: &mut AccountRegistry,
        request: &SwapRequest,
        exchange: &str,
    ) -> Result<Transaction, TradingError> {
        let result = self.execute_swap(registry, request, exchange);
        if let Err(err) = &result {
            warn!(
                wallet = %request.wallet,
                from = %request.from_currency,
                to = %request.to_currency,
                amount = %request.from_amount,
                exchange,
                error = %err,
                "Swap rejected"
            );
        }
        result
    }

    fn execute_swap(
        &mut self,
        registry: &mut AccountRegistry,
        request: &SwapRequest,
        exchange_name: &str,
    ) -> Result<Transaction, TradingError> {
        let admission = self.admission;
        let (wallet, _) = registry.resolve_hot(&request.wallet)?;
        let exchange = self
            .exchanges
            .get_mut(exchange_name)
            .ok_or_else(|| TradingError::ExchangeNotFound {
                name: exchange_name.to_string(),
            })?;

        check_balance(wallet, request.from_currency, request.from_amount)?;
        check_passphrase(wallet, &request.passphrase)?;
        check_admission(admission, request.admission_number)?;
        let rate = lookup_rate(exchange, request.from_currency, request.to_currency)?;
        let to_amount = quote(request.from_currency, request.to_currency, request.from_amount, rate)?;

        let plan = plan_transfer(
            wallet,
            wallet,
            request.from_currency,
            request.from_amount,
            request.to_currency,
            to_amount,
        )?;
        let transaction: Transaction = SwapTransaction::new(
            WalletRef::from(wallet),
            request.from_currency,
            request.from_amount,
            request.to_currency,
            to_amount,
        )
        .into();

        commit(registry, plan)?;
        exchange.record(transaction.clone());

        info!(
            transaction_id = %transaction.id(),
            kind = transaction.kind_label(),
            exchange = exchange_name,
            from = %request.from_currency,
            from_amount = %request.from_amount,
            to = %request.to_currency,
            to_amount = %to_amount,
            rate = %rate,
            "Swap settled"
        );
        Ok(transaction)
    }
}

// ───────────────────────── Checks ─────────────────────────

fn check_user_status(user: &User) -> Result<(), TradingError> {
    if !user.status.can_trade() {
        return Err(TradingError::UserStatus {
            status: user.status,
        });
    }
    Ok(())
}

fn check_balance(wallet: &Wallet, currency: Currency, amount: Decimal) -> Result<(), TradingError> {
    if amount < Decimal::ZERO {
        return Err(TransactionError::InvalidAmount { amount }.into());
    }
    let available = wallet
        .currencies
        .get(&currency)
        .copied()
        .ok_or(WalletError::NoSuchCurrency { currency })?;
    if available < amount {
        return Err(WalletError::NotEnoughMoney {
            currency,
            required: amount,
            available,
        }
        .into());
    }
    Ok(())
}

fn check_passphrase(wallet: &Wallet, passphrase: &str) -> Result<(), TradingError> {
    if wallet.passphrase != passphrase {
        return Err(TradingError::WrongPassphrase);
    }
    Ok(())
}

fn check_admission(admission: AdmissionRange, number: i32) -> Result<(), TradingError> {
    if !admission.contains(number) {
        return Err(TransactionError::AdmissionRejected {
            number,
            min: admission.min(),
            max: admission.max(),
        }
        .into());
    }
    Ok(())
}

/// Rate for converting `from` into `to`, stored under the (to, from) key
fn lookup_rate(exchange: &Exchange, from: Currency, to: Currency) -> Result<Decimal, TradingError> {
    let pair = CurrencyPair::for_conversion(from, to);
    let rate = exchange
        .rate(&pair)
        .ok_or(TradingError::NoSuitableExchange { from, to })?;
    debug!(exchange = exchange.name(), pair = %pair, rate = %rate, "Rate found");
    Ok(rate)
}

fn quote(from: Currency, to: Currency, amount: Decimal, rate: Decimal) -> Result<Decimal, TradingError> {
    if rate <= Decimal::ZERO {
        return Err(TransactionError::InvalidRate {
            pair: CurrencyPair::for_conversion(from, to).to_string(),
            rate,
        }
        .into());
    }
    quote_amount(amount, rate).ok_or_else(|| TransactionError::Overflow.into())
}

// ───────────────────────── Transfer ─────────────────────────

/// Compute the post-transfer balances without touching any wallet.
///
/// `debit` and `credit` may be the same wallet; when the currencies also
/// match, the credit is applied on top of the debited balance.
fn plan_transfer(
    debit: &Wallet,
    credit: &Wallet,
    from_currency: Currency,
    from_amount: Decimal,
    to_currency: Currency,
    to_amount: Decimal,
) -> Result<TransferPlan, TradingError> {
    let debit_balance = debit.balance(from_currency) - from_amount;

    let credit_base = if debit.id == credit.id && from_currency == to_currency {
        debit_balance
    } else {
        credit.balance(to_currency)
    };
    let credit_balance = credit_base
        .checked_add(to_amount)
        .ok_or(TransactionError::Overflow)?;

    Ok(TransferPlan {
        debit_wallet: debit.id,
        debit_currency: from_currency,
        debit_balance,
        credit_wallet: credit.id,
        credit_currency: to_currency,
        credit_balance,
    })
}

fn commit(registry: &mut AccountRegistry, plan: TransferPlan) -> Result<(), TradingError> {
    registry.set_balance(&plan.debit_wallet, plan.debit_currency, plan.debit_balance)?;
    registry.set_balance(&plan.credit_wallet, plan.credit_currency, plan.credit_balance)
}
