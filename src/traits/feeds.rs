use crate::feeds::FeedError;
use crate::market::snapshot::{FxRate, Quote, QuoteSource};
use async_trait::async_trait;

/// Trait for fetching one quote from one external source
///
/// Each call is independent and side-effect-free beyond the network I/O.
/// Implementations carry a bounded request timeout and never retry
/// internally; retry and fallback policy belong to the caller.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Which snapshot field this feed populates
    fn source(&self) -> QuoteSource;

    /// Fetch the current quote from the upstream
    async fn fetch(&self) -> Result<Quote, FeedError>;
}

/// Trait for fetching the USD/KRW conversion rate
#[async_trait]
pub trait FxRateFeed: Send + Sync {
    /// Fetch the current conversion rate from the upstream
    async fn fetch(&self) -> Result<FxRate, FeedError>;
}
