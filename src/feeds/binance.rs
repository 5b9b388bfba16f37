use crate::feeds::error::FeedError;
use crate::market::snapshot::{Quote, QuoteSource};
use crate::traits::feeds::PriceFeed;
use crate::types::Price;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Reference-price client for the Binance spot ticker endpoint
pub struct BinanceFeed {
    http_client: Client,
    base_url: String,
    symbol: String,
}

impl BinanceFeed {
    pub fn new(http_client: Client, base_url: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            symbol: symbol.into(),
        }
    }

    /// Extract the price from a `/api/v3/ticker/price` body
    ///
    /// Binance serializes prices as strings, e.g. `{"symbol":"BTCUSDT","price":"117650.10"}`.
    fn parse_price(json: &Value) -> Result<Price, FeedError> {
        let raw = json
            .get("price")
            .and_then(|v| v.as_str())
            .ok_or_else(|| FeedError::Parse("missing price field".to_string()))?;
        let price = Price::from_str(raw)
            .map_err(|e| FeedError::Parse(format!("invalid price {:?}: {}", raw, e)))?;
        if !price.is_positive() {
            return Err(FeedError::Parse(format!("non-positive price {}", price)));
        }
        Ok(price)
    }
}

#[async_trait]
impl PriceFeed for BinanceFeed {
    fn source(&self) -> QuoteSource {
        QuoteSource::Reference
    }

    async fn fetch(&self) -> Result<Quote, FeedError> {
        let url = format!(
            "{}/api/v3/ticker/price?symbol={}",
            self.base_url, self.symbol
        );
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(FeedError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(FeedError::Api(format!(
                "ticker request failed: {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        let price = Self::parse_price(&json)?;
        Ok(Quote::new(QuoteSource::Reference, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_parse_ticker_body() {
        let body = json!({"symbol": "BTCUSDT", "price": "117650.10"});
        let price = BinanceFeed::parse_price(&body).unwrap();
        assert_eq!(price.value(), Decimal::new(11765010, 2));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let body = json!({"symbol": "BTCUSDT"});
        assert!(matches!(
            BinanceFeed::parse_price(&body),
            Err(FeedError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_zero_price() {
        let body = json!({"symbol": "BTCUSDT", "price": "0"});
        assert!(matches!(
            BinanceFeed::parse_price(&body),
            Err(FeedError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_numeric_price() {
        // Binance always sends strings; a bare number means a schema change
        let body = json!({"symbol": "BTCUSDT", "price": 117650.10});
        assert!(matches!(
            BinanceFeed::parse_price(&body),
            Err(FeedError::Parse(_))
        ));
    }
}
