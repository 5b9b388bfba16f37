use crate::types::{Freshness, Premium, Price};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a quote source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSource {
    /// International reference exchange (Binance)
    Reference,
    /// Primary domestic exchange (Upbit)
    DomesticA,
    /// Secondary domestic exchange (Bithumb)
    DomesticB,
}

impl fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuoteSource::Reference => "reference",
            QuoteSource::DomesticA => "domestic_a",
            QuoteSource::DomesticB => "domestic_b",
        };
        write!(f, "{}", label)
    }
}

/// One observed price from one source, immutable once produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub source: QuoteSource,
    pub price: Price,
    pub observed_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(source: QuoteSource, price: Price) -> Self {
        Self {
            source,
            price,
            observed_at: Utc::now(),
        }
    }
}

/// One observed USD/KRW conversion rate, immutable once produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FxRate {
    pub usd_to_krw: Decimal,
    pub observed_at: DateTime<Utc>,
}

impl FxRate {
    pub fn new(usd_to_krw: Decimal) -> Self {
        Self {
            usd_to_krw,
            observed_at: Utc::now(),
        }
    }
}

/// Per-field origin tags for a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSources {
    pub binance: Freshness,
    pub domestic_a: Freshness,
    pub domestic_b: Freshness,
    pub fx_rate: Freshness,
}

impl SnapshotSources {
    pub fn all_fresh(&self) -> bool {
        self.binance.is_fresh()
            && self.domestic_a.is_fresh()
            && self.domestic_b.is_fresh()
            && self.fx_rate.is_fresh()
    }
}

/// One atomically-captured view of the market
///
/// Both premiums are derived from this snapshot's own prices and fx rate,
/// never mixed across captures. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub binance: Price,
    pub domestic_a: Price,
    pub domestic_b: Price,
    pub fx_rate: Decimal,
    pub premium_a: Premium,
    pub premium_b: Premium,
    pub captured_at: DateTime<Utc>,
    pub sources: SnapshotSources,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Freshness;

    #[test]
    fn test_quote_source_labels() {
        assert_eq!(QuoteSource::Reference.to_string(), "reference");
        assert_eq!(QuoteSource::DomesticA.to_string(), "domestic_a");
        assert_eq!(QuoteSource::DomesticB.to_string(), "domestic_b");
    }

    #[test]
    fn test_sources_all_fresh() {
        let sources = SnapshotSources {
            binance: Freshness::Fresh,
            domestic_a: Freshness::Fresh,
            domestic_b: Freshness::Fresh,
            fx_rate: Freshness::Fresh,
        };
        assert!(sources.all_fresh());

        let degraded = SnapshotSources {
            fx_rate: Freshness::Fallback,
            ..sources
        };
        assert!(!degraded.all_fresh());
    }
}
