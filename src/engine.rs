use crate::config::EngineConfig;
use crate::feeds::{BinanceFeed, BithumbFeed, ExchangeRateFeed, UpbitFeed};
use crate::ledger::order::{Order, Settlement};
use crate::ledger::paper::{LedgerError, PaperLedger};
use crate::ledger::wallet::Wallet;
use crate::market::aggregator::{SnapshotAggregator, SnapshotError};
use crate::market::snapshot::MarketSnapshot;
use crate::storage::file::FileWalletStore;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
pub enum EngineError {
    Snapshot(SnapshotError),
    Ledger(LedgerError),
    Init(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Snapshot(e) => write!(f, "{}", e),
            EngineError::Ledger(e) => write!(f, "{}", e),
            EngineError::Init(msg) => write!(f, "Engine init failed: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Snapshot(e) => Some(e),
            EngineError::Ledger(e) => Some(e),
            EngineError::Init(_) => None,
        }
    }
}

impl From<SnapshotError> for EngineError {
    fn from(e: SnapshotError) -> Self {
        EngineError::Snapshot(e)
    }
}

impl From<LedgerError> for EngineError {
    fn from(e: LedgerError) -> Self {
        EngineError::Ledger(e)
    }
}

/// Facade over the aggregator and the paper ledger
///
/// This is the surface the surrounding application (HTTP routes, CLI,
/// advisor prompt builder) talks to; it exposes the snapshot/query
/// interface and the single ledger write operation, nothing else.
pub struct PremiumEngine {
    aggregator: Arc<SnapshotAggregator>,
    ledger: PaperLedger,
}

impl PremiumEngine {
    pub fn new(aggregator: Arc<SnapshotAggregator>, ledger: PaperLedger) -> Self {
        Self { aggregator, ledger }
    }

    /// Wire the engine from configuration: live feed clients plus the
    /// JSON-file wallet store
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = config
            .http_client()
            .map_err(|e| EngineError::Init(e.to_string()))?;

        let aggregator = Arc::new(SnapshotAggregator::new(
            Box::new(BinanceFeed::new(
                client.clone(),
                config.binance_url.clone(),
                config.symbol.clone(),
            )),
            Box::new(UpbitFeed::new(
                client.clone(),
                config.upbit_url.clone(),
                config.domestic_market.clone(),
            )),
            Box::new(BithumbFeed::new(
                client.clone(),
                config.bithumb_url.clone(),
                config.domestic_market.clone(),
            )),
            Box::new(ExchangeRateFeed::new(client, config.fx_url.clone())),
        ));
        let ledger = PaperLedger::new(Box::new(FileWalletStore::new(config.wallet_file.clone())));
        Ok(Self::new(aggregator, ledger))
    }

    /// The aggregator handle, for wiring a background refresh task
    pub fn aggregator(&self) -> Arc<SnapshotAggregator> {
        self.aggregator.clone()
    }

    /// Capture and return a fresh snapshot
    pub async fn snapshot(&self) -> Result<MarketSnapshot, EngineError> {
        Ok(self.aggregator.capture().await?)
    }

    /// Recent snapshots, most-recent-last, at most 50 entries
    pub async fn history(&self) -> Vec<MarketSnapshot> {
        self.aggregator.recent_history().await
    }

    /// Current simulated wallet
    pub async fn wallet(&self) -> Result<Wallet, EngineError> {
        Ok(self.ledger.wallet().await?)
    }

    /// Settle a paper trade against the latest snapshot's domestic-A price
    ///
    /// Captures a snapshot first if none exists yet; otherwise settlement
    /// uses the most recent capture, decoupling trade latency from feed
    /// latency.
    pub async fn trade(&self, order: Order) -> Result<Settlement, EngineError> {
        let snapshot = match self.aggregator.latest().await {
            Some(snapshot) => snapshot,
            None => self.aggregator.capture().await?,
        };
        Ok(self.ledger.settle(&order, snapshot.domestic_a).await?)
    }
}
