//! End-to-end trading scenarios
//!
//! Two approved users trade and swap through one exchange whose rate table
//! is keyed (to, from):
//! - (BITCOIN, ETHEREUM) = 0.8
//! - (ETHEREUM, BITCOIN) = 1.25
//! - (BITCOIN, TON) = 0.7
//! - (TON, BITCOIN) = 1.43

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use trading_service::{
    AccountRegistry, PersonalAccountService, SwapRequest, TradeRequest, TradingConfig,
    TradingService,
};
use types::currency::Currency;
use types::errors::{TradingError, TransactionError, WalletError};
use types::ids::{UserId, WalletId};
use types::transaction::Transaction;
use types::user::{Status, User};
use types::wallet::Wallet;

const CONFIG: &str = r#"{
    "exchanges": [
        {
            "name": "TestExchange",
            "rates": [
                { "base": "BITCOIN", "quote": "ETHEREUM", "rate": "0.8" },
                { "base": "ETHEREUM", "quote": "BITCOIN", "rate": "1.25" },
                { "base": "BITCOIN", "quote": "TON", "rate": "0.7" },
                { "base": "TON", "quote": "BITCOIN", "rate": "1.43" }
            ]
        }
    ]
}"#;

struct Market {
    service: TradingService,
    registry: AccountRegistry,
    user1: UserId,
    wallet11: WalletId,
    wallet21: WalletId,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn setup_market() -> Market {
    init_tracing();
    let config = TradingConfig::from_json_str(CONFIG).unwrap();
    let service = TradingService::from_config(&config).unwrap();

    let mut registry = AccountRegistry::new();
    let user1 = registry.add_user(User::new("111@gmail.com", "user1", Status::APPROVED));
    let user2 = registry.add_user(User::new("222@gmail.com", "user2", Status::APPROVED));
    let wallet11 = registry
        .add_wallet(
            user1,
            Wallet::with_currencies(
                "wallet11",
                "passphrase",
                user1,
                [(Currency::BITCOIN, Decimal::from(1000))],
            ),
        )
        .unwrap();
    let wallet21 = registry
        .add_wallet(user2, Wallet::new("wallet21", "passphrase", user2))
        .unwrap();

    Market {
        service,
        registry,
        user1,
        wallet11,
        wallet21,
    }
}

fn balances(market: &Market) -> Vec<BTreeMap<Currency, Decimal>> {
    [market.wallet11, market.wallet21]
        .iter()
        .map(|id| market.registry.wallet(id).unwrap().currencies.clone())
        .collect()
}

fn history(market: &Market) -> Vec<Transaction> {
    market
        .service
        .exchange("TestExchange")
        .unwrap()
        .history()
        .to_vec()
}

fn btc_to_eth_swap(market: &Market, passphrase: &str, admission_number: i32) -> SwapRequest {
    SwapRequest {
        wallet: market.wallet11,
        passphrase: passphrase.to_string(),
        from_currency: Currency::BITCOIN,
        from_amount: Decimal::from(100),
        to_currency: Currency::ETHEREUM,
        admission_number,
    }
}

#[test]
fn test_trade_quotes_and_moves_funds() {
    let mut market = setup_market();
    let request = TradeRequest {
        initiator: market.wallet11,
        receiver: market.wallet21,
        from_currency: Currency::BITCOIN,
        from_amount: Decimal::from(100),
        to_currency: Currency::ETHEREUM,
    };

    let tx = market
        .service
        .trade_transaction(&mut market.registry, &request, "TestExchange")
        .unwrap();

    assert_eq!(tx.to_amount(), dec("80.00"));
    assert_eq!(tx.to_amount().scale(), 2);
    let after = balances(&market);
    assert_eq!(after[0][&Currency::BITCOIN], dec("900"));
    assert_eq!(after[1][&Currency::ETHEREUM], dec("80.00"));
    assert_eq!(history(&market), vec![tx]);
}

#[test]
fn test_swap_outside_admission_range_changes_nothing() {
    let mut market = setup_market();
    let before = balances(&market);
    let request = btc_to_eth_swap(&market, "passphrase", 50);

    let err = market
        .service
        .swap_transaction(&mut market.registry, &request, "TestExchange")
        .unwrap_err();

    assert!(matches!(
        err,
        TradingError::Transaction(TransactionError::AdmissionRejected { number: 50, .. })
    ));
    assert_eq!(
        err.to_string(),
        "Transaction error: Transaction failed: admission number 50 outside [0, 25]"
    );
    assert_eq!(balances(&market), before);
    assert!(history(&market).is_empty());
}

#[test]
fn test_swap_wrong_passphrase_changes_nothing() {
    let mut market = setup_market();
    let before = balances(&market);
    let request = btc_to_eth_swap(&market, "wrong_passphrase", 0);

    let err = market
        .service
        .swap_transaction(&mut market.registry, &request, "TestExchange")
        .unwrap_err();

    assert_eq!(err, TradingError::WrongPassphrase);
    assert_eq!(balances(&market), before);
    assert!(history(&market).is_empty());
}

#[test]
fn test_new_initiator_rejected_before_balance_check() {
    let mut market = setup_market();
    market.registry.set_status(&market.user1, Status::NEW).unwrap();
    // 5000 BITCOIN would fail the balance check too
    let request = TradeRequest {
        initiator: market.wallet11,
        receiver: market.wallet21,
        from_currency: Currency::BITCOIN,
        from_amount: Decimal::from(5000),
        to_currency: Currency::TON,
    };

    let err = market
        .service
        .trade_transaction(&mut market.registry, &request, "TestExchange")
        .unwrap_err();

    assert_eq!(err, TradingError::UserStatus { status: Status::NEW });
    assert_eq!(err.to_string(), "User status is NEW");
}

#[test]
fn test_trade_for_unquoted_pair() {
    let mut market = setup_market();
    market
        .registry
        .hot_wallet_mut(&market.wallet11)
        .unwrap()
        .currencies
        .insert(Currency::ETHEREUM, Decimal::from(10));
    let before = balances(&market);
    let request = TradeRequest {
        initiator: market.wallet11,
        receiver: market.wallet21,
        from_currency: Currency::ETHEREUM,
        from_amount: Decimal::from(5),
        to_currency: Currency::TON,
    };

    let err = market
        .service
        .trade_transaction(&mut market.registry, &request, "TestExchange")
        .unwrap_err();

    assert_eq!(
        err,
        TradingError::NoSuitableExchange {
            from: Currency::ETHEREUM,
            to: Currency::TON
        }
    );
    assert_eq!(balances(&market), before);
}

#[test]
fn test_balance_across_wallets() {
    let owner = UserId::new();
    let wallet1 = Wallet::with_currencies(
        "wallet1",
        "pass",
        owner,
        [
            (Currency::TON, Decimal::from(100)),
            (Currency::BITCOIN, Decimal::from(200)),
        ],
    );
    let wallet2 = Wallet::with_currencies(
        "wallet2",
        "pass",
        owner,
        [
            (Currency::TON, Decimal::from(500)),
            (Currency::ETHEREUM, Decimal::from(300)),
        ],
    );

    let balance = PersonalAccountService::new()
        .get_balance(&[&wallet1, &wallet2])
        .unwrap();

    let expected: BTreeMap<Currency, Decimal> = [
        (Currency::TON, Decimal::from(600)),
        (Currency::BITCOIN, Decimal::from(200)),
        (Currency::ETHEREUM, Decimal::from(300)),
    ]
    .into_iter()
    .collect();
    assert_eq!(balance, expected);
}

#[test]
fn test_insufficient_funds_reports_amounts() {
    let mut market = setup_market();
    let request = TradeRequest {
        initiator: market.wallet11,
        receiver: market.wallet21,
        from_currency: Currency::BITCOIN,
        from_amount: Decimal::from(1001),
        to_currency: Currency::ETHEREUM,
    };

    let err = market
        .service
        .trade_transaction(&mut market.registry, &request, "TestExchange")
        .unwrap_err();

    assert_eq!(
        err,
        TradingError::Wallet(WalletError::NotEnoughMoney {
            currency: Currency::BITCOIN,
            required: Decimal::from(1001),
            available: Decimal::from(1000),
        })
    );
}

#[test]
fn test_period_query_sees_settled_trades() {
    let mut market = setup_market();
    let start = chrono::Utc::now() - chrono::Duration::seconds(1);
    let request = TradeRequest {
        initiator: market.wallet11,
        receiver: market.wallet21,
        from_currency: Currency::BITCOIN,
        from_amount: Decimal::from(70),
        to_currency: Currency::TON,
    };
    market
        .service
        .trade_transaction(&mut market.registry, &request, "TestExchange")
        .unwrap();
    let end = chrono::Utc::now() + chrono::Duration::seconds(1);

    let user1 = market.registry.user(&market.user1).unwrap();
    let exchange = market.service.exchange("TestExchange").unwrap();
    let found = PersonalAccountService::new().get_transactions_for_period(user1, exchange, start, end);

    assert_eq!(found.len(), 1);
    // 70 / 1.43 = 48.951...
    assert_eq!(found[0].to_amount(), dec("48.95"));
}
