pub mod aggregator;
pub mod history;
pub mod premium;
pub mod refresh;
pub mod snapshot;

pub use aggregator::{SnapshotAggregator, SnapshotError};
pub use history::HistoryBuffer;
pub use premium::premium;
pub use refresh::RefreshTask;
pub use snapshot::{FxRate, MarketSnapshot, Quote, QuoteSource, SnapshotSources};
