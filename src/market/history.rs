use crate::market::snapshot::MarketSnapshot;
use std::collections::VecDeque;

/// Default retention for charting/analysis
pub const HISTORY_CAPACITY: usize = 50;

/// Bounded, insertion-ordered ring of recent snapshots
///
/// `len() <= capacity` always holds; the oldest entry is evicted in the
/// same call that inserts the newest. Insertion order is capture order.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<MarketSnapshot>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be positive");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a snapshot, evicting the oldest entry at capacity
    pub fn append(&mut self, snapshot: MarketSnapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Ordered view of retained snapshots, most-recent-last
    pub fn recent(&self) -> Vec<MarketSnapshot> {
        self.entries.iter().cloned().collect()
    }

    /// Most recently appended snapshot, if any
    pub fn latest(&self) -> Option<&MarketSnapshot> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::snapshot::SnapshotSources;
    use crate::types::{Freshness, Premium, Price};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn snapshot(seq: i64) -> MarketSnapshot {
        MarketSnapshot {
            binance: Price::new(Decimal::from(seq)),
            domestic_a: Price::new(Decimal::from(seq)),
            domestic_b: Price::new(Decimal::from(seq)),
            fx_rate: Decimal::from(1350),
            premium_a: Premium::ZERO,
            premium_b: Premium::ZERO,
            captured_at: Utc::now(),
            sources: SnapshotSources {
                binance: Freshness::Fresh,
                domestic_a: Freshness::Fresh,
                domestic_b: Freshness::Fresh,
                fx_rate: Freshness::Fresh,
            },
        }
    }

    #[test]
    fn test_append_and_order() {
        let mut buffer = HistoryBuffer::new();
        for seq in 0..3 {
            buffer.append(snapshot(seq));
        }
        let recent = buffer.recent();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].binance, Price::new(Decimal::from(0)));
        assert_eq!(recent[2].binance, Price::new(Decimal::from(2)));
        assert_eq!(buffer.latest().unwrap().binance, Price::new(Decimal::from(2)));
    }

    #[test]
    fn test_capacity_bound_after_overflow() {
        let mut buffer = HistoryBuffer::new();
        for seq in 0..60 {
            buffer.append(snapshot(seq));
            assert!(buffer.len() <= HISTORY_CAPACITY);
        }
        let recent = buffer.recent();
        assert_eq!(recent.len(), 50);
        // Retained entries are exactly the last 50 in capture order
        for (i, snap) in recent.iter().enumerate() {
            assert_eq!(snap.binance, Price::new(Decimal::from(10 + i as i64)));
        }
    }

    #[test]
    fn test_small_capacity_eviction() {
        let mut buffer = HistoryBuffer::with_capacity(2);
        buffer.append(snapshot(1));
        buffer.append(snapshot(2));
        buffer.append(snapshot(3));
        let recent = buffer.recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].binance, Price::new(Decimal::from(2)));
        assert_eq!(recent[1].binance, Price::new(Decimal::from(3)));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = HistoryBuffer::new();
        assert!(buffer.is_empty());
        assert!(buffer.latest().is_none());
        assert!(buffer.recent().is_empty());
    }
}
