use crate::ledger::order::{Order, OrderSide, Settlement};
use crate::ledger::wallet::Wallet;
use crate::traits::storage::{StorageError, WalletStore};
use crate::types::Price;
use chrono::Utc;
use log::{info, warn};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fmt;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Settlement failure
///
/// `InsufficientFunds` and `InsufficientHoldings` are user-correctable and
/// leave the wallet untouched. `Storage` means the write did not durably
/// succeed, so the in-memory wallet was not committed either.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    InsufficientHoldings {
        symbol: String,
    },
    Validation(String),
    DuplicateOrder(Uuid),
    Storage(StorageError),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InsufficientFunds {
                requested,
                available,
            } => write!(
                f,
                "Insufficient funds: requested {} with {} available",
                requested, available
            ),
            LedgerError::InsufficientHoldings { symbol } => {
                write!(f, "Insufficient holdings: no {} to sell", symbol)
            }
            LedgerError::Validation(msg) => write!(f, "Invalid order: {}", msg),
            LedgerError::DuplicateOrder(id) => {
                write!(f, "Order {} was already settled", id)
            }
            LedgerError::Storage(e) => write!(f, "Settlement not persisted: {}", e),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for LedgerError {
    fn from(e: StorageError) -> Self {
        LedgerError::Storage(e)
    }
}

struct LedgerState {
    wallet: Option<Wallet>,
    settled_orders: HashSet<Uuid>,
}

/// Simulated trading ledger over the single wallet
///
/// All reads and settlements go through one lock, so two concurrent sells
/// of the same symbol cannot both observe the same positive holding. A
/// settlement is staged on a copy, persisted through the storage port, and
/// only then committed to memory; no partial mutation is ever observable.
pub struct PaperLedger {
    store: Box<dyn WalletStore>,
    state: Mutex<LedgerState>,
}

impl PaperLedger {
    pub fn new(store: Box<dyn WalletStore>) -> Self {
        Self {
            store,
            state: Mutex::new(LedgerState {
                wallet: None,
                settled_orders: HashSet::new(),
            }),
        }
    }

    /// Current wallet, seeding and persisting the default on first access
    pub async fn wallet(&self) -> Result<Wallet, LedgerError> {
        let mut state = self.state.lock().await;
        self.loaded_wallet(&mut state).await
    }

    /// Wallet from cache, storage, or the persisted default seed
    async fn loaded_wallet(&self, state: &mut LedgerState) -> Result<Wallet, LedgerError> {
        if let Some(wallet) = &state.wallet {
            return Ok(wallet.clone());
        }
        let wallet = match self.store.load_wallet().await? {
            Some(wallet) => wallet,
            None => {
                let seed = Wallet::seed();
                self.store.save_wallet(&seed).await?;
                info!("no persisted wallet found, seeded default");
                seed
            }
        };
        state.wallet = Some(wallet.clone());
        Ok(wallet)
    }

    /// Execute one buy/sell order against the supplied reference price
    ///
    /// The caller supplies the price from the latest market snapshot; the
    /// ledger never triggers a fetch itself, which keeps settlement timing
    /// independent of feed latency and the ledger testable with synthetic
    /// prices.
    pub async fn settle(
        &self,
        order: &Order,
        reference_price: Price,
    ) -> Result<Settlement, LedgerError> {
        let mut state = self.state.lock().await;

        if let Some(order_id) = order.order_id {
            if state.settled_orders.contains(&order_id) {
                warn!("rejecting duplicate order {}", order_id);
                return Err(LedgerError::DuplicateOrder(order_id));
            }
        }
        if order.symbol.is_empty() {
            return Err(LedgerError::Validation("symbol must not be empty".to_string()));
        }
        if !reference_price.is_positive() {
            return Err(LedgerError::Validation(format!(
                "reference price {} is not positive",
                reference_price
            )));
        }

        let wallet = self.loaded_wallet(&mut state).await?;
        let (staged, quantity) = match order.side {
            OrderSide::Buy => Self::apply_buy(wallet, order, reference_price)?,
            OrderSide::Sell => Self::apply_sell(wallet, order, reference_price)?,
        };

        // Persist before committing; a failed write leaves memory untouched
        self.store.save_wallet(&staged).await?;

        state.wallet = Some(staged.clone());
        if let Some(order_id) = order.order_id {
            state.settled_orders.insert(order_id);
        }

        let settlement = Settlement {
            settlement_id: Uuid::new_v4(),
            side: order.side,
            symbol: order.symbol.clone(),
            quantity,
            price: reference_price,
            executed_at: Utc::now(),
            wallet: staged,
        };
        info!(
            "settled {:?} {} {} @ {} (settlement {})",
            settlement.side, settlement.quantity, settlement.symbol, settlement.price,
            settlement.settlement_id
        );
        Ok(settlement)
    }

    fn apply_buy(
        mut wallet: Wallet,
        order: &Order,
        reference_price: Price,
    ) -> Result<(Wallet, Decimal), LedgerError> {
        let amount = order
            .amount_in_cash
            .ok_or_else(|| LedgerError::Validation("buy requires amount_in_cash".to_string()))?;
        if !amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "amount_in_cash {} is not positive",
                amount
            )));
        }
        if amount.value() > wallet.cash {
            return Err(LedgerError::InsufficientFunds {
                requested: amount.value(),
                available: wallet.cash,
            });
        }

        let quantity = amount.value() / reference_price.value();
        wallet.cash -= amount.value();
        *wallet
            .holdings
            .entry(order.symbol.clone())
            .or_insert(Decimal::ZERO) += quantity;
        Ok((wallet, quantity))
    }

    /// Sells liquidate the entire held quantity; partial sells are not
    /// supported by the product, which is why no sell amount exists on the
    /// order.
    fn apply_sell(
        mut wallet: Wallet,
        order: &Order,
        reference_price: Price,
    ) -> Result<(Wallet, Decimal), LedgerError> {
        let held = wallet.holding(&order.symbol);
        if held <= Decimal::ZERO {
            return Err(LedgerError::InsufficientHoldings {
                symbol: order.symbol.clone(),
            });
        }

        wallet.cash += held * reference_price.value();
        wallet.holdings.insert(order.symbol.clone(), Decimal::ZERO);
        Ok((wallet, held))
    }
}
