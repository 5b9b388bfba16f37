use crate::ledger::wallet::Wallet;
use crate::rules::TradingRule;
use crate::traits::storage::{RuleStore, StorageError, WalletStore};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Read a JSON document, mapping a missing file to `None`
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::Io(e.to_string())),
    };
    let value = serde_json::from_str(&raw)
        .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)))?;
    Ok(Some(value))
}

/// Write a JSON document through a temp file and rename
///
/// A crash mid-write leaves the previous file intact instead of a torn one.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::Io(e.to_string()))?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    tokio::fs::write(&tmp, body)
        .await
        .map_err(|e| StorageError::Io(e.to_string()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StorageError::Io(e.to_string()))?;
    Ok(())
}

/// Wallet persistence as a single JSON file
pub struct FileWalletStore {
    path: PathBuf,
}

impl FileWalletStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WalletStore for FileWalletStore {
    async fn load_wallet(&self) -> Result<Option<Wallet>, StorageError> {
        read_json(&self.path).await
    }

    async fn save_wallet(&self, wallet: &Wallet) -> Result<(), StorageError> {
        write_json(&self.path, wallet).await
    }
}

/// Rule list persistence as a single JSON file
pub struct FileRuleStore {
    path: PathBuf,
}

impl FileRuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RuleStore for FileRuleStore {
    async fn load_rules(&self) -> Result<Vec<TradingRule>, StorageError> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    async fn save_rules(&self, rules: &[TradingRule]) -> Result<(), StorageError> {
        write_json(&self.path, &rules.to_vec()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn scratch_path(prefix: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}.json", prefix, Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_missing_wallet_file_is_absent_not_error() {
        let store = FileWalletStore::new(scratch_path("wallet"));
        assert_eq!(store.load_wallet().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_wallet_round_trip() {
        let path = scratch_path("wallet");
        let store = FileWalletStore::new(path.clone());

        let mut wallet = Wallet::seed();
        wallet.holdings.insert("BTC".to_string(), Decimal::new(25, 3));
        store.save_wallet(&wallet).await.unwrap();

        let loaded = store.load_wallet().await.unwrap();
        assert_eq!(loaded, Some(wallet));

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn test_corrupt_wallet_file_is_typed_error() {
        let path = scratch_path("wallet");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = FileWalletStore::new(path.clone());
        assert!(matches!(
            store.load_wallet().await,
            Err(StorageError::Corrupt(_))
        ));

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn test_rule_round_trip() {
        let path = scratch_path("rules");
        let store = FileRuleStore::new(path.clone());

        assert!(store.load_rules().await.unwrap().is_empty());

        let rules = vec![TradingRule::new("buy under 1% premium")];
        store.save_rules(&rules).await.unwrap();
        assert_eq!(store.load_rules().await.unwrap(), rules);

        let _ = tokio::fs::remove_file(path).await;
    }
}
