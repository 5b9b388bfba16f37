use crate::ledger::wallet::Wallet;
use crate::types::Price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Transient settlement input, consumed by a single `settle` call
///
/// `amount_in_cash` is required for buys and ignored for sells; a sell
/// always liquidates the entire held quantity of the symbol. `order_id` is
/// optional and exists so a client can retry safely: a second submission
/// with the same id is rejected instead of settled twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub side: OrderSide,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_in_cash: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,
}

impl Order {
    pub fn buy(symbol: impl Into<String>, amount_in_cash: Price) -> Self {
        Self {
            side: OrderSide::Buy,
            symbol: symbol.into(),
            amount_in_cash: Some(amount_in_cash),
            order_id: None,
        }
    }

    pub fn sell(symbol: impl Into<String>) -> Self {
        Self {
            side: OrderSide::Sell,
            symbol: symbol.into(),
            amount_in_cash: None,
            order_id: None,
        }
    }

    pub fn with_order_id(mut self, order_id: Uuid) -> Self {
        self.order_id = Some(order_id);
        self
    }
}

/// Receipt for one successful settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub settlement_id: Uuid,
    pub side: OrderSide,
    pub symbol: String,
    /// Asset quantity bought or liquidated
    pub quantity: Decimal,
    /// Reference price the order settled against
    pub price: Price,
    pub executed_at: DateTime<Utc>,
    /// Wallet state after the settlement committed
    pub wallet: Wallet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_order_shape() {
        let order = Order::buy("BTC", Price::from_str("1000000").unwrap());
        assert_eq!(order.side, OrderSide::Buy);
        assert!(order.amount_in_cash.is_some());
        assert!(order.order_id.is_none());
    }

    #[test]
    fn test_order_deserializes_from_wire_shape() {
        let json = r#"{"side": "buy", "symbol": "BTC", "amount_in_cash": "1000000"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.symbol, "BTC");
        assert_eq!(
            order.amount_in_cash,
            Some(Price::from_str("1000000").unwrap())
        );
    }

    #[test]
    fn test_sell_order_needs_no_amount() {
        let json = r#"{"side": "sell", "symbol": "BTC"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.side, OrderSide::Sell);
        assert!(order.amount_in_cash.is_none());
    }
}
