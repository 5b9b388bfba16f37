use crate::traits::storage::{RuleStore, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One human-readable trading idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingRule {
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TradingRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "pending".to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only registry of trading ideas
///
/// External collaborator of the engine: it consumes snapshots only as
/// context for idea text and produces nothing the market computation
/// depends on. There is no removal API.
pub struct RuleRegistry {
    store: Box<dyn RuleStore>,
}

impl RuleRegistry {
    pub fn new(store: Box<dyn RuleStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<TradingRule>, StorageError> {
        self.store.load_rules().await
    }

    pub async fn add(&self, name: impl Into<String>) -> Result<TradingRule, StorageError> {
        let rule = TradingRule::new(name);
        let mut rules = self.store.load_rules().await?;
        rules.push(rule.clone());
        self.store.save_rules(&rules).await?;
        info!(rule = %rule.name, "trading rule recorded");
        Ok(rule)
    }
}
