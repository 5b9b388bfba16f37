pub mod binance;
pub mod bithumb;
pub mod error;
pub mod fx;
pub mod mock;
pub mod upbit;

pub use binance::BinanceFeed;
pub use bithumb::BithumbFeed;
pub use error::FeedError;
pub use fx::ExchangeRateFeed;
pub use mock::{MockFxRateFeed, MockPriceFeed};
pub use upbit::UpbitFeed;
