pub mod advisor;
pub mod config;
pub mod engine;
pub mod feeds;
pub mod ledger;
pub mod market;
pub mod rules;
pub mod storage;
pub mod traits;
pub mod types;

pub use config::EngineConfig;
pub use engine::{EngineError, PremiumEngine};
pub use feeds::{BinanceFeed, BithumbFeed, ExchangeRateFeed, FeedError, UpbitFeed};
pub use ledger::{LedgerError, Order, OrderSide, PaperLedger, Settlement, Wallet};
pub use market::{
    HistoryBuffer, MarketSnapshot, Quote, QuoteSource, RefreshTask, SnapshotAggregator,
    SnapshotError,
};
pub use rules::{RuleRegistry, TradingRule};
pub use storage::{FileRuleStore, FileWalletStore, MemoryRuleStore, MemoryWalletStore};
pub use traits::{Advisor, FxRateFeed, PriceFeed, RuleStore, StorageError, WalletStore};
pub use types::{Freshness, Premium, Price};

/// Initialize console logging for binaries
pub fn init_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
