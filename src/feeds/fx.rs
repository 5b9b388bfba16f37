use crate::feeds::error::FeedError;
use crate::market::snapshot::FxRate;
use crate::traits::feeds::FxRateFeed;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// USD/KRW conversion-rate client for the exchangerate-api endpoint
pub struct ExchangeRateFeed {
    http_client: Client,
    base_url: String,
}

impl ExchangeRateFeed {
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Extract the KRW rate from a `/v4/latest/USD` body
    ///
    /// A zero or negative rate is rejected as a parse failure so a broken
    /// upstream cannot silently zero out every premium downstream.
    fn parse_rate(json: &Value) -> Result<Decimal, FeedError> {
        let raw = json
            .get("rates")
            .and_then(|r| r.get("KRW"))
            .filter(|v| v.is_number())
            .ok_or_else(|| FeedError::Parse("missing rates.KRW field".to_string()))?;
        let rate = Decimal::from_str(&raw.to_string())
            .map_err(|e| FeedError::Parse(format!("invalid rate {}: {}", raw, e)))?;
        if rate <= Decimal::ZERO {
            return Err(FeedError::Parse(format!("non-positive rate {}", rate)));
        }
        Ok(rate)
    }
}

#[async_trait]
impl FxRateFeed for ExchangeRateFeed {
    async fn fetch(&self) -> Result<FxRate, FeedError> {
        let url = format!("{}/v4/latest/USD", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(FeedError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(FeedError::Api(format!(
                "rate request failed: {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        let rate = Self::parse_rate(&json)?;
        Ok(FxRate::new(rate))
    }
}
