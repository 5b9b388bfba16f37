use crate::ledger::wallet::Wallet;
use crate::rules::TradingRule;
use async_trait::async_trait;
use std::fmt;

/// Persistence failure behind a storage port
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Io(String),
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "Storage I/O error: {}", msg),
            StorageError::Corrupt(msg) => write!(f, "Corrupt stored data: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Storage port for the simulated wallet
///
/// The ledger does not assume a specific persistence technology; anything
/// that can durably hold one wallet satisfies this contract.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Load the wallet, or `None` if it has never been saved
    async fn load_wallet(&self) -> Result<Option<Wallet>, StorageError>;

    /// Durably persist the wallet; must not report success on a failed write
    async fn save_wallet(&self, wallet: &Wallet) -> Result<(), StorageError>;
}

/// Storage port for the append-only rule registry
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn load_rules(&self) -> Result<Vec<TradingRule>, StorageError>;

    async fn save_rules(&self, rules: &[TradingRule]) -> Result<(), StorageError>;
}
