use premium_engine::feeds::{MockFxRateFeed, MockPriceFeed};
use premium_engine::market::{QuoteSource, SnapshotAggregator};
use premium_engine::storage::MemoryWalletStore;
use premium_engine::types::{Freshness, Price};
use premium_engine::{EngineError, LedgerError, Order, PaperLedger, PremiumEngine, Wallet};
use rust_decimal::Decimal;
use std::sync::Arc;

struct Fixture {
    engine: PremiumEngine,
    domestic_a: MockPriceFeed,
    store: MemoryWalletStore,
}

fn price(s: &str) -> Price {
    Price::from_str(s).unwrap()
}

/// Engine over mock feeds: reference 100,000 USD, domestic venues at a
/// 10% / 6% premium against a 1,350 KRW/USD rate.
fn fixture() -> Fixture {
    let reference = MockPriceFeed::new(QuoteSource::Reference, price("100000"));
    let domestic_a = MockPriceFeed::new(QuoteSource::DomesticA, price("148500000"));
    let domestic_b = MockPriceFeed::new(QuoteSource::DomesticB, price("143100000"));
    let fx = MockFxRateFeed::new(Decimal::from(1350));

    let aggregator = Arc::new(SnapshotAggregator::new(
        Box::new(reference),
        Box::new(domestic_a.clone()),
        Box::new(domestic_b),
        Box::new(fx),
    ));
    let store = MemoryWalletStore::new();
    let ledger = PaperLedger::new(Box::new(store.clone()));
    Fixture {
        engine: PremiumEngine::new(aggregator, ledger),
        domestic_a,
        store,
    }
}

#[tokio::test]
async fn test_snapshot_and_history_flow() {
    let f = fixture();

    let snapshot = f.engine.snapshot().await.unwrap();
    assert_eq!(snapshot.premium_a.value(), Decimal::from(10));
    assert_eq!(snapshot.premium_b.value(), Decimal::from(6));
    assert!(snapshot.sources.all_fresh());

    f.engine.snapshot().await.unwrap();
    let history = f.engine.history().await;
    assert_eq!(history.len(), 2);
    assert!(history[0].captured_at <= history[1].captured_at);
}

#[tokio::test]
async fn test_history_is_bounded_at_fifty() {
    let f = fixture();
    for _ in 0..60 {
        f.engine.snapshot().await.unwrap();
    }
    let history = f.engine.history().await;
    assert_eq!(history.len(), 50);
    // Oldest evicted first: entries are in capture order
    for pair in history.windows(2) {
        assert!(pair[0].captured_at <= pair[1].captured_at);
    }
}

#[tokio::test]
async fn test_wallet_starts_from_seed() {
    let f = fixture();
    assert_eq!(f.engine.wallet().await.unwrap(), Wallet::seed());
}

#[tokio::test]
async fn test_trade_settles_at_domestic_a_price() {
    let f = fixture();
    f.domestic_a.set_price(price("100000000")).await;

    let settlement = f
        .engine
        .trade(Order::buy("BTC", price("1000000")))
        .await
        .unwrap();

    // 1,000,000 cash at 100,000,000 per coin -> 0.01 BTC
    assert_eq!(settlement.quantity, Decimal::new(1, 2));
    assert_eq!(settlement.price, price("100000000"));
    assert_eq!(settlement.wallet.cash, Decimal::from(9_000_000));

    // Trade with no prior snapshot captured one on demand
    assert_eq!(f.engine.history().await.len(), 1);
    // And the settlement reached the storage port
    assert_eq!(
        f.store.saved_wallet().await.unwrap().holding("BTC"),
        Decimal::new(1, 2)
    );
}

#[tokio::test]
async fn test_buy_then_sell_round_trip() {
    let f = fixture();
    f.domestic_a.set_price(price("100000000")).await;
    f.engine.snapshot().await.unwrap();

    f.engine
        .trade(Order::buy("BTC", price("1000000")))
        .await
        .unwrap();

    // Price moves up 10% before the sell
    f.domestic_a.set_price(price("110000000")).await;
    f.engine.snapshot().await.unwrap();

    let settlement = f.engine.trade(Order::sell("BTC")).await.unwrap();
    assert_eq!(settlement.wallet.cash, Decimal::from(10_100_000));
    assert_eq!(settlement.wallet.holding("BTC"), Decimal::ZERO);
}

#[tokio::test]
async fn test_trade_rejections_are_structured() {
    let f = fixture();

    let err = f
        .engine
        .trade(Order::buy("BTC", price("20000000")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Ledger(LedgerError::InsufficientFunds { .. })
    ));

    let err = f.engine.trade(Order::sell("BTC")).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Ledger(LedgerError::InsufficientHoldings { .. })
    ));

    // Both rejections left the wallet untouched
    assert_eq!(f.engine.wallet().await.unwrap(), Wallet::seed());
}

#[tokio::test]
async fn test_trade_rejected_when_price_never_observed() {
    let f = fixture();
    // Domestic A has been down since startup: its price degrades to zero
    f.domestic_a
        .set_error(premium_engine::FeedError::Network("down".to_string()))
        .await;

    let snapshot = f.engine.snapshot().await.unwrap();
    assert_eq!(snapshot.sources.domestic_a, Freshness::Fallback);

    let err = f
        .engine
        .trade(Order::buy("BTC", price("1000000")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Ledger(LedgerError::Validation(_))
    ));
}

#[tokio::test]
async fn test_trade_uses_last_known_good_under_outage() {
    let f = fixture();
    f.domestic_a.set_price(price("100000000")).await;
    f.engine.snapshot().await.unwrap();

    // Feed goes down after one good capture; settlement still works off
    // the cached quote
    f.domestic_a
        .set_error(premium_engine::FeedError::Timeout("down".to_string()))
        .await;
    f.engine.snapshot().await.unwrap();

    let settlement = f
        .engine
        .trade(Order::buy("BTC", price("1000000")))
        .await
        .unwrap();
    assert_eq!(settlement.price, price("100000000"));
}
