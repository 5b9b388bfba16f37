use crate::ledger::wallet::Wallet;
use crate::market::snapshot::MarketSnapshot;
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    Unavailable(String),
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::Unavailable(msg) => write!(f, "Advisor unavailable: {}", msg),
        }
    }
}

impl std::error::Error for AdvisorError {}

/// Port for the natural-language trading advisor
///
/// The engine only supplies market context; it never parses or interprets
/// the returned text. Generation itself lives outside this crate.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn advise(
        &self,
        snapshot: &MarketSnapshot,
        wallet: Option<&Wallet>,
    ) -> Result<String, AdvisorError>;
}
