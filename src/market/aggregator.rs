use crate::market::history::HistoryBuffer;
use crate::market::premium::premium;
use crate::market::snapshot::{MarketSnapshot, Quote, SnapshotSources};
use crate::traits::feeds::{FxRateFeed, PriceFeed};
use crate::types::{Freshness, Price};
use chrono::Utc;
use rust_decimal::Decimal;
use std::fmt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Static substitute applied when the fx fetch fails with no cached rate
pub const FX_RATE_FALLBACK: Decimal = Decimal::from_parts(1350, 0, 0, false, 0);

/// Total capture failure: every source failed in the same fan-out
///
/// Individual feed failures never surface here; they degrade to fallback
/// values inside `capture`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    AllSourcesFailed(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::AllSourcesFailed(detail) => {
                write!(f, "All market data sources failed: {}", detail)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Last successful value per source, used as a substitute under partial outage
#[derive(Debug, Default)]
struct LastKnownGood {
    reference: Option<Price>,
    domestic_a: Option<Price>,
    domestic_b: Option<Price>,
    fx_rate: Option<Decimal>,
}

struct AggregatorState {
    history: HistoryBuffer,
    last_good: LastKnownGood,
}

/// Fans out to all feeds concurrently and assembles atomic snapshots
///
/// One slow or failed source does not block or poison the others; capture
/// latency is bounded by the slowest individual fetch. Snapshot assembly and
/// history mutation run under one lock, so concurrent captures (user-driven
/// plus the background refresh) are serialized with respect to the buffer.
pub struct SnapshotAggregator {
    reference: Box<dyn PriceFeed>,
    domestic_a: Box<dyn PriceFeed>,
    domestic_b: Box<dyn PriceFeed>,
    fx: Box<dyn FxRateFeed>,
    state: Mutex<AggregatorState>,
}

impl SnapshotAggregator {
    pub fn new(
        reference: Box<dyn PriceFeed>,
        domestic_a: Box<dyn PriceFeed>,
        domestic_b: Box<dyn PriceFeed>,
        fx: Box<dyn FxRateFeed>,
    ) -> Self {
        Self {
            reference,
            domestic_a,
            domestic_b,
            fx,
            state: Mutex::new(AggregatorState {
                history: HistoryBuffer::new(),
                last_good: LastKnownGood::default(),
            }),
        }
    }

    /// Capture one snapshot and append it to history
    ///
    /// Fails only if every source failed in this fan-out; in that case
    /// nothing is appended. A partially degraded snapshot carries
    /// `Freshness::Fallback` tags on the substituted fields.
    pub async fn capture(&self) -> Result<MarketSnapshot, SnapshotError> {
        let (reference, domestic_a, domestic_b, fx_rate) = tokio::join!(
            self.reference.fetch(),
            self.domestic_a.fetch(),
            self.domestic_b.fetch(),
            self.fx.fetch(),
        );

        if reference.is_err() && domestic_a.is_err() && domestic_b.is_err() && fx_rate.is_err() {
            let detail = [
                reference.as_ref().err(),
                domestic_a.as_ref().err(),
                domestic_b.as_ref().err(),
                fx_rate.as_ref().err(),
            ]
            .iter()
            .flatten()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
            warn!(detail = %detail, "snapshot capture failed on every source");
            return Err(SnapshotError::AllSourcesFailed(detail));
        }

        let mut state = self.state.lock().await;

        let (binance, binance_fresh) =
            resolve_price(reference, &mut state.last_good.reference, "reference");
        let (a_price, a_fresh) =
            resolve_price(domestic_a, &mut state.last_good.domestic_a, "domestic_a");
        let (b_price, b_fresh) =
            resolve_price(domestic_b, &mut state.last_good.domestic_b, "domestic_b");

        let (rate, rate_fresh) = match fx_rate {
            Ok(observed) => {
                state.last_good.fx_rate = Some(observed.usd_to_krw);
                (observed.usd_to_krw, Freshness::Fresh)
            }
            Err(e) => {
                let substitute = state.last_good.fx_rate.unwrap_or(FX_RATE_FALLBACK);
                warn!(error = %e, rate = %substitute, "fx fetch failed, using fallback rate");
                (substitute, Freshness::Fallback)
            }
        };

        // Premiums are derived from this capture's values only
        let snapshot = MarketSnapshot {
            binance,
            domestic_a: a_price,
            domestic_b: b_price,
            fx_rate: rate,
            premium_a: premium(a_price, binance, rate),
            premium_b: premium(b_price, binance, rate),
            captured_at: Utc::now(),
            sources: SnapshotSources {
                binance: binance_fresh,
                domestic_a: a_fresh,
                domestic_b: b_fresh,
                fx_rate: rate_fresh,
            },
        };

        state.history.append(snapshot.clone());
        debug!(
            premium_a = %snapshot.premium_a,
            premium_b = %snapshot.premium_b,
            degraded = !snapshot.sources.all_fresh(),
            "snapshot captured"
        );
        Ok(snapshot)
    }

    /// Ordered view of retained snapshots, most-recent-last, length <= 50
    pub async fn recent_history(&self) -> Vec<MarketSnapshot> {
        let state = self.state.lock().await;
        state.history.recent()
    }

    /// Most recently captured snapshot, if any
    pub async fn latest(&self) -> Option<MarketSnapshot> {
        let state = self.state.lock().await;
        state.history.latest().cloned()
    }
}

/// Pick the fresh price, or fall back to the last-known-good value
///
/// A source that failed before ever succeeding degrades to a zero price;
/// its premium then reflects the zero-guard policy rather than real data.
fn resolve_price(
    fetched: Result<Quote, crate::feeds::FeedError>,
    last_good: &mut Option<Price>,
    source: &str,
) -> (Price, Freshness) {
    match fetched {
        Ok(quote) => {
            *last_good = Some(quote.price);
            (quote.price, Freshness::Fresh)
        }
        Err(e) => {
            let substitute = last_good.unwrap_or(Price::ZERO);
            warn!(source = source, error = %e, price = %substitute, "feed failed, using fallback price");
            (substitute, Freshness::Fallback)
        }
    }
}
