use crate::ledger::wallet::Wallet;
use crate::market::snapshot::MarketSnapshot;
use crate::traits::advisor::{Advisor, AdvisorError};
use async_trait::async_trait;

/// Advisor stub that returns a fixed suggestion
///
/// Used for wiring and tests; a real language-model-backed advisor lives
/// outside this crate and implements the same trait.
pub struct StaticAdvisor {
    suggestion: String,
}

impl StaticAdvisor {
    pub fn new(suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: suggestion.into(),
        }
    }
}

#[async_trait]
impl Advisor for StaticAdvisor {
    async fn advise(
        &self,
        _snapshot: &MarketSnapshot,
        _wallet: Option<&Wallet>,
    ) -> Result<String, AdvisorError> {
        Ok(self.suggestion.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::snapshot::SnapshotSources;
    use crate::types::{Freshness, Premium, Price};
    use chrono::Utc;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_static_advisor_returns_fixed_text() {
        let snapshot = MarketSnapshot {
            binance: Price::new(Decimal::from(100000)),
            domestic_a: Price::new(Decimal::from(148500000_i64)),
            domestic_b: Price::new(Decimal::from(143100000_i64)),
            fx_rate: Decimal::from(1350),
            premium_a: Premium::new(Decimal::from(10)),
            premium_b: Premium::new(Decimal::from(6)),
            captured_at: Utc::now(),
            sources: SnapshotSources {
                binance: Freshness::Fresh,
                domestic_a: Freshness::Fresh,
                domestic_b: Freshness::Fresh,
                fx_rate: Freshness::Fresh,
            },
        };

        let advisor = StaticAdvisor::new("hold");
        let text = advisor.advise(&snapshot, None).await.unwrap();
        assert_eq!(text, "hold");
    }
}
