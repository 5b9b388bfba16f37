use std::fmt;

/// Failure of a single external quote or fx-rate fetch
///
/// Always recoverable from the aggregator's point of view: the capture
/// substitutes a fallback value instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Transport-level failure (connect, TLS, DNS)
    Network(String),
    /// The request exceeded its bounded timeout
    Timeout(String),
    /// The upstream answered with a non-success status
    Api(String),
    /// The body did not contain a usable price/rate
    Parse(String),
}

impl FeedError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout(err.to_string())
        } else {
            FeedError::Network(err.to_string())
        }
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "Network error: {}", msg),
            FeedError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            FeedError::Api(msg) => write!(f, "API error: {}", msg),
            FeedError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}
