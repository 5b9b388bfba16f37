use crate::feeds::error::FeedError;
use crate::market::snapshot::{Quote, QuoteSource};
use crate::traits::feeds::PriceFeed;
use crate::types::Price;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Domestic-price client for the Bithumb ticker endpoint
///
/// Bithumb's v1 ticker mirrors Upbit's response shape on its own host.
pub struct BithumbFeed {
    http_client: Client,
    base_url: String,
    market: String,
}

impl BithumbFeed {
    pub fn new(http_client: Client, base_url: impl Into<String>, market: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            market: market.into(),
        }
    }

    fn parse_price(json: &Value) -> Result<Price, FeedError> {
        let entry = json
            .as_array()
            .and_then(|arr| arr.first())
            .ok_or_else(|| FeedError::Parse("empty ticker response".to_string()))?;
        let raw = entry
            .get("trade_price")
            .filter(|v| v.is_number())
            .ok_or_else(|| FeedError::Parse("missing trade_price field".to_string()))?;
        let price = Price::from_str(&raw.to_string())
            .map_err(|e| FeedError::Parse(format!("invalid trade_price {}: {}", raw, e)))?;
        if !price.is_positive() {
            return Err(FeedError::Parse(format!("non-positive price {}", price)));
        }
        Ok(price)
    }
}

#[async_trait]
impl PriceFeed for BithumbFeed {
    fn source(&self) -> QuoteSource {
        QuoteSource::DomesticB
    }

    async fn fetch(&self) -> Result<Quote, FeedError> {
        let url = format!("{}/v1/ticker?markets={}", self.base_url, self.market);
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
        Ok(Quote::new(QuoteSource::DomesticB, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_parse_ticker_body() {
        let body = json!([{"market": "KRW-BTC", "trade_price": 164800000.0}]);
        let price = BithumbFeed::parse_price(&body).unwrap();
        assert_eq!(price.value(), Decimal::new(1648000000, 1));
    }

    #[test]
    fn test_parse_rejects_non_numeric_price() {
        let body = json!([{"market": "KRW-BTC", "trade_price": "164800000"}]);
        assert!(matches!(
            BithumbFeed::parse_price(&body),
            Err(FeedError::Parse(_))
        ));
    }
}
