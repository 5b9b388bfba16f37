use crate::feeds::error::FeedError;
use crate::market::snapshot::{Quote, QuoteSource};
use crate::traits::feeds::PriceFeed;
use crate::types::Price;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Domestic-price client for the Upbit ticker endpoint
pub struct UpbitFeed {
    http_client: Client,
    base_url: String,
    market: String,
}

impl UpbitFeed {
    pub fn new(http_client: Client, base_url: impl Into<String>, market: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            market: market.into(),
        }
    }

    /// Extract the trade price from a `/v1/ticker` body
    ///
    /// Upbit answers with an array of markets and numeric prices, e.g.
    /// `[{"market":"KRW-BTC","trade_price":165000000.0}]`. The number is
    /// parsed from its JSON literal to avoid a float round-trip.
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
impl PriceFeed for UpbitFeed {
    fn source(&self) -> QuoteSource {
        QuoteSource::DomesticA
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
        Ok(Quote::new(QuoteSource::DomesticA, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_parse_ticker_body() {
        let body = json!([{"market": "KRW-BTC", "trade_price": 165000000.0}]);
        let price = UpbitFeed::parse_price(&body).unwrap();
        assert_eq!(price.value(), Decimal::new(1650000000, 1));
    }

    #[test]
    fn test_parse_integer_price() {
        let body = json!([{"market": "KRW-BTC", "trade_price": 165000000}]);
        let price = UpbitFeed::parse_price(&body).unwrap();
        assert_eq!(price.value(), Decimal::from(165000000_i64));
    }

    #[test]
    fn test_parse_rejects_empty_array() {
        let body = json!([]);
        assert!(matches!(
            UpbitFeed::parse_price(&body),
            Err(FeedError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let body = json!([{"market": "KRW-BTC"}]);
        assert!(matches!(
            UpbitFeed::parse_price(&body),
            Err(FeedError::Parse(_))
        ));
    }
}
