use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Engine configuration, environment-driven with hard defaults
///
/// Every endpoint can be overridden, which is also how tests point the
/// real feed clients at a local mock server.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub binance_url: String,
    pub upbit_url: String,
    pub bithumb_url: String,
    pub fx_url: String,
    /// Reference-exchange symbol, e.g. BTCUSDT
    pub symbol: String,
    /// Domestic market code, e.g. KRW-BTC
    pub domestic_market: String,
    pub fetch_timeout: Duration,
    pub refresh_interval: Duration,
    pub wallet_file: String,
    pub rules_file: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binance_url: "https://api.binance.com".to_string(),
            upbit_url: "https://api.upbit.com".to_string(),
            bithumb_url: "https://api.bithumb.com".to_string(),
            fx_url: "https://api.exchangerate-api.com".to_string(),
            symbol: "BTCUSDT".to_string(),
            domestic_market: "KRW-BTC".to_string(),
            fetch_timeout: Duration::from_secs(5),
            refresh_interval: Duration::from_secs(5),
            wallet_file: "wallet.json".to_string(),
            rules_file: "rules.json".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment (and `.env` if present)
    pub fn from_env() -> Self {
        let _ = dotenv();
        let defaults = Self::default();

        Self {
            binance_url: env_or("BINANCE_REST_URL", defaults.binance_url),
            upbit_url: env_or("UPBIT_REST_URL", defaults.upbit_url),
            bithumb_url: env_or("BITHUMB_REST_URL", defaults.bithumb_url),
            fx_url: env_or("FX_REST_URL", defaults.fx_url),
            symbol: env_or("SYMBOL", defaults.symbol),
            domestic_market: env_or("DOMESTIC_MARKET", defaults.domestic_market),
            fetch_timeout: env_secs("FETCH_TIMEOUT_SECS", defaults.fetch_timeout),
            refresh_interval: env_secs("REFRESH_INTERVAL_SECS", defaults.refresh_interval),
            wallet_file: env_or("WALLET_FILE", defaults.wallet_file),
            rules_file: env_or("RULES_FILE", defaults.rules_file),
        }
    }

    /// HTTP client shared by all feed clients, with the bounded per-request
    /// timeout every external fetch must carry
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().timeout(self.fetch_timeout).build()
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_secs(key: &str, default: Duration) -> Duration {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}
