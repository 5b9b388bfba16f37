use crate::ledger::wallet::Wallet;
use crate::rules::TradingRule;
use crate::traits::storage::{RuleStore, StorageError, WalletStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory wallet store for tests and ephemeral runs
///
/// Clones share state. `fail_saves` flips the store into a write-failure
/// mode to exercise the settlement-abort path.
#[derive(Debug, Clone)]
pub struct MemoryWalletStore {
    wallet: Arc<RwLock<Option<Wallet>>>,
    saves_fail: Arc<RwLock<bool>>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self {
            wallet: Arc::new(RwLock::new(None)),
            saves_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub fn with_wallet(wallet: Wallet) -> Self {
        Self {
            wallet: Arc::new(RwLock::new(Some(wallet))),
            saves_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn fail_saves(&self, fail: bool) {
        let mut flag = self.saves_fail.write().await;
        *flag = fail;
    }

    /// Last successfully saved wallet, for test assertions
    pub async fn saved_wallet(&self) -> Option<Wallet> {
        self.wallet.read().await.clone()
    }
}

impl Default for MemoryWalletStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletStore for MemoryWalletStore {
    async fn load_wallet(&self) -> Result<Option<Wallet>, StorageError> {
        Ok(self.wallet.read().await.clone())
    }

    async fn save_wallet(&self, wallet: &Wallet) -> Result<(), StorageError> {
        if *self.saves_fail.read().await {
            return Err(StorageError::Io("simulated write failure".to_string()));
        }
        let mut slot = self.wallet.write().await;
        *slot = Some(wallet.clone());
        Ok(())
    }
}

/// In-memory rule store for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryRuleStore {
    rules: Arc<RwLock<Vec<TradingRule>>>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn load_rules(&self) -> Result<Vec<TradingRule>, StorageError> {
        Ok(self.rules.read().await.clone())
    }

    async fn save_rules(&self, rules: &[TradingRule]) -> Result<(), StorageError> {
        let mut slot = self.rules.write().await;
        *slot = rules.to_vec();
        Ok(())
    }
}
