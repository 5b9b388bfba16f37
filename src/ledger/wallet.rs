use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Simulated wallet: cash balance plus per-asset holdings
///
/// One logical instance per deployment, owned exclusively by the paper
/// ledger. Mutated only through settlement; `cash` and every holding stay
/// non-negative because violating orders are rejected up front, never
/// clamped after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub cash: Decimal,
    pub holdings: HashMap<String, Decimal>,
}

impl Wallet {
    /// Default seed applied on first access when no wallet was persisted
    pub fn seed() -> Self {
        Self {
            cash: Decimal::from(10_000_000),
            holdings: HashMap::new(),
        }
    }

    /// Held quantity for a symbol, zero if the asset was never bought
    pub fn holding(&self, symbol: &str) -> Decimal {
        self.holdings.get(symbol).copied().unwrap_or(Decimal::ZERO)
    }
}
