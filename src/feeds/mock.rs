use crate::feeds::error::FeedError;
use crate::market::snapshot::{FxRate, Quote, QuoteSource};
use crate::traits::feeds::{FxRateFeed, PriceFeed};
use crate::types::Price;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mock implementation of PriceFeed for testing
///
/// Clones share state, so a test can keep a handle and flip the feed
/// between success and failure while the aggregator owns the boxed trait
/// object.
#[derive(Debug, Clone)]
pub struct MockPriceFeed {
    source: QuoteSource,
    outcome: Arc<RwLock<Result<Price, FeedError>>>,
}

impl MockPriceFeed {
    pub fn new(source: QuoteSource, price: Price) -> Self {
        Self {
            source,
            outcome: Arc::new(RwLock::new(Ok(price))),
        }
    }

    pub fn failing(source: QuoteSource) -> Self {
        Self {
            source,
            outcome: Arc::new(RwLock::new(Err(FeedError::Network(
                "mock feed down".to_string(),
            )))),
        }
    }

    pub async fn set_price(&self, price: Price) {
        let mut outcome = self.outcome.write().await;
        *outcome = Ok(price);
    }

    pub async fn set_error(&self, error: FeedError) {
        let mut outcome = self.outcome.write().await;
        *outcome = Err(error);
    }
}

#[async_trait]
impl PriceFeed for MockPriceFeed {
    fn source(&self) -> QuoteSource {
        self.source
    }

    async fn fetch(&self) -> Result<Quote, FeedError> {
        let outcome = self.outcome.read().await;
        outcome
            .as_ref()
            .map(|price| Quote::new(self.source, *price))
            .map_err(|e| e.clone())
    }
}

/// Mock implementation of FxRateFeed for testing
#[derive(Debug, Clone)]
pub struct MockFxRateFeed {
    outcome: Arc<RwLock<Result<Decimal, FeedError>>>,
}

impl MockFxRateFeed {
    pub fn new(rate: Decimal) -> Self {
        Self {
            outcome: Arc::new(RwLock::new(Ok(rate))),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Arc::new(RwLock::new(Err(FeedError::Network(
                "mock fx feed down".to_string(),
            )))),
        }
    }

    pub async fn set_rate(&self, rate: Decimal) {
        let mut outcome = self.outcome.write().await;
        *outcome = Ok(rate);
    }

    pub async fn set_error(&self, error: FeedError) {
        let mut outcome = self.outcome.write().await;
        *outcome = Err(error);
    }
}

#[async_trait]
impl FxRateFeed for MockFxRateFeed {
    async fn fetch(&self) -> Result<FxRate, FeedError> {
        let outcome = self.outcome.read().await;
        outcome
            .as_ref()
            .map(|rate| FxRate::new(*rate))
            .map_err(|e| e.clone())
    }
}
