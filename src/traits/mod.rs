pub mod advisor;
pub mod feeds;
pub mod storage;

pub use advisor::{Advisor, AdvisorError};
pub use feeds::{FxRateFeed, PriceFeed};
pub use storage::{RuleStore, StorageError, WalletStore};
