//! Settled transaction records
//!
//! `Transaction` is a closed set of two variants. Records are immutable:
//! fields are private, the id and timestamp are assigned at construction.

use crate::currency::Currency;
use crate::ids::{TransactionId, UserId, WalletId};
use crate::wallet::Wallet;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Non-owning reference to a wallet taking part in a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletRef {
    pub wallet_id: WalletId,
    pub owner_id: UserId,
}

impl From<&Wallet> for WalletRef {
    fn from(wallet: &Wallet) -> Self {
        Self {
            wallet_id: wallet.id,
            owner_id: wallet.owner,
        }
    }
}

/// Conversion between two wallets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeTransaction {
    id: TransactionId,
    created_at: DateTime<Utc>,
    initiator: WalletRef,
    receiver: WalletRef,
    from_currency: Currency,
    from_amount: Decimal,
    to_currency: Currency,
    to_amount: Decimal,
}

impl TradeTransaction {
    pub fn new(
        initiator: WalletRef,
        receiver: WalletRef,
        from_currency: Currency,
        from_amount: Decimal,
        to_currency: Currency,
        to_amount: Decimal,
    ) -> Self {
        Self::new_at(
            initiator,
            receiver,
            from_currency,
            from_amount,
            to_currency,
            to_amount,
            Utc::now(),
        )
    }

    /// Create a trade record with an explicit creation timestamp
    #[allow(clippy::too_many_arguments)]
    pub fn new_at(
        initiator: WalletRef,
        receiver: WalletRef,
        from_currency: Currency,
        from_amount: Decimal,
        to_currency: Currency,
        to_amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            created_at,
            initiator,
            receiver,
            from_currency,
            from_amount,
            to_currency,
            to_amount,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn initiator(&self) -> WalletRef {
        self.initiator
    }

    pub fn receiver(&self) -> WalletRef {
        self.receiver
    }

    pub fn from_currency(&self) -> Currency {
        self.from_currency
    }

    pub fn from_amount(&self) -> Decimal {
        self.from_amount
    }

    pub fn to_currency(&self) -> Currency {
        self.to_currency
    }

    pub fn to_amount(&self) -> Decimal {
        self.to_amount
    }
}

/// In-place conversion within one wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapTransaction {
    id: TransactionId,
    created_at: DateTime<Utc>,
    initiator: WalletRef,
    from_currency: Currency,
    from_amount: Decimal,
    to_currency: Currency,
    to_amount: Decimal,
}

impl SwapTransaction {
    pub fn new(
        initiator: WalletRef,
        from_currency: Currency,
        from_amount: Decimal,
        to_currency: Currency,
        to_amount: Decimal,
    ) -> Self {
        Self::new_at(
            initiator,
            from_currency,
            from_amount,
            to_currency,
            to_amount,
            Utc::now(),
        )
    }

    /// Create a swap record with an explicit creation timestamp
    pub fn new_at(
        initiator: WalletRef,
        from_currency: Currency,
        from_amount: Decimal,
        to_currency: Currency,
        to_amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            created_at,
            initiator,
            from_currency,
            from_amount,
            to_currency,
            to_amount,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn initiator(&self) -> WalletRef {
        self.initiator
    }

    pub fn from_currency(&self) -> Currency {
        self.from_currency
    }

    pub fn from_amount(&self) -> Decimal {
        self.from_amount
    }

    pub fn to_currency(&self) -> Currency {
        self.to_currency
    }

    pub fn to_amount(&self) -> Decimal {
        self.to_amount
    }
}

/// A settled trade or swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum Transaction {
    Trade(TradeTransaction),
    Swap(SwapTransaction),
}

impl Transaction {
    pub fn id(&self) -> TransactionId {
        match self {
            Transaction::Trade(t) => t.id(),
            Transaction::Swap(s) => s.id(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Transaction::Trade(t) => t.created_at(),
            Transaction::Swap(s) => s.created_at(),
        }
    }

    /// Wallet the funds were taken from
    pub fn initiator(&self) -> WalletRef {
        match self {
            Transaction::Trade(t) => t.initiator(),
            Transaction::Swap(s) => s.initiator(),
        }
    }

    /// Wallet that was credited: the receiver of a trade, the initiator of a swap
    pub fn counterparty_wallet(&self) -> WalletRef {
        match self {
            Transaction::Trade(t) => t.receiver(),
            Transaction::Swap(s) => s.initiator(),
        }
    }

    pub fn from_currency(&self) -> Currency {
        match self {
            Transaction::Trade(t) => t.from_currency(),
            Transaction::Swap(s) => s.from_currency(),
        }
    }

    pub fn from_amount(&self) -> Decimal {
        match self {
            Transaction::Trade(t) => t.from_amount(),
            Transaction::Swap(s) => s.from_amount(),
        }
    }

    pub fn to_currency(&self) -> Currency {
        match self {
            Transaction::Trade(t) => t.to_currency(),
            Transaction::Swap(s) => s.to_currency(),
        }
    }

    pub fn to_amount(&self) -> Decimal {
        match self {
            Transaction::Trade(t) => t.to_amount(),
            Transaction::Swap(s) => s.to_amount(),
        }
    }

    /// Variant label for logs
    pub fn kind_label(&self) -> &'static str {
        match self {
            Transaction::Trade(_) => "TRADE",
            Transaction::Swap(_) => "SWAP",
        }
    }
}

impl From<TradeTransaction> for Transaction {
    fn from(trade: TradeTransaction) -> Self {
        Transaction::Trade(trade)
    }
}

impl From<SwapTransaction> for Transaction {
    fn from(swap: SwapTransaction) -> Self {
        Transaction::Swap(swap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn wallet_ref() -> WalletRef {
        WalletRef {
            wallet_id: WalletId::new(),
            owner_id: UserId::new(),
        }
    }

    #[test]
    fn test_counterparty_of_swap_is_initiator() {
        let initiator = wallet_ref();
        let tx: Transaction = SwapTransaction::new(
            initiator,
            Currency::BITCOIN,
            Decimal::from(50),
            Currency::TON,
            Decimal::from(60),
        )
        .into();
        assert_eq!(tx.counterparty_wallet(), initiator);
        assert_eq!(tx.initiator(), initiator);
        assert_eq!(tx.kind_label(), "SWAP");
    }

    #[test]
    fn test_counterparty_of_trade_is_receiver() {
        let initiator = wallet_ref();
        let receiver = wallet_ref();
        let tx: Transaction = TradeTransaction::new(
            initiator,
            receiver,
            Currency::BITCOIN,
            Decimal::from(50),
            Currency::ETHEREUM,
            Decimal::from(60),
        )
        .into();
        assert_eq!(tx.counterparty_wallet(), receiver);
        assert_eq!(tx.initiator(), initiator);
        assert_eq!(tx.kind_label(), "TRADE");
    }

    #[test]
    fn test_each_transaction_gets_its_own_id() {
        let initiator = wallet_ref();
        let a = SwapTransaction::new(
            initiator,
            Currency::BITCOIN,
            Decimal::ONE,
            Currency::TON,
            Decimal::ONE,
        );
        let b = a.clone();
        let c = SwapTransaction::new(
            initiator,
            Currency::BITCOIN,
            Decimal::ONE,
            Currency::TON,
            Decimal::ONE,
        );
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn test_explicit_timestamp_is_kept() {
        let at = Utc::now() - Duration::days(2);
        let tx = SwapTransaction::new_at(
            wallet_ref(),
            Currency::TON,
            Decimal::from(50),
            Currency::ETHEREUM,
            Decimal::from(60),
            at,
        );
        assert_eq!(tx.created_at(), at);
    }

    #[test]
    fn test_serialization_is_tagged() {
        let tx: Transaction = SwapTransaction::new(
            wallet_ref(),
            Currency::BITCOIN,
            Decimal::ONE,
            Currency::TON,
            Decimal::ONE,
        )
        .into();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["kind"], tx.kind_label());
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }
}
