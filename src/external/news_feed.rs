use async_trait::async_trait;
use thiserror::Error;

use crate::models::Article;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RetrievalCause {
    #[error("network error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("feed returned status {0}")]
    Status(u16),

    #[error("feed body exceeds {0} bytes")]
    TooLarge(usize),

    #[error("malformed feed: {0}")]
    MalformedFeed(String),
}

/// Failure to retrieve the news feed for a ticker. Fatal for the whole request.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to retrieve news for {ticker}: {cause}")]
pub struct RetrievalError {
    pub ticker: String,
    #[source]
    pub cause: RetrievalCause,
}

impl RetrievalError {
    pub fn new(ticker: &str, cause: RetrievalCause) -> Self {
        Self {
            ticker: ticker.to_string(),
            cause,
        }
    }
}

/// Source of recent news articles for a ticker.
///
/// Implementations return at most their configured number of articles,
/// most recent first as ordered by the upstream feed, each with a valid
/// publish time. An empty list means "no news", not a failure.
#[async_trait]
pub trait NewsFeed: Send + Sync {
    async fn fetch(&self, ticker: &str) -> Result<Vec<Article>, RetrievalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_ticker_and_cause() {
        let err = RetrievalError::new("AAPL", RetrievalCause::Status(503));
        assert_eq!(
            err.to_string(),
            "failed to retrieve news for AAPL: feed returned status 503"
        );
    }

    #[test]
    fn test_error_source_is_cause() {
        use std::error::Error as _;

        let err = RetrievalError::new("TSLA", RetrievalCause::Timeout);
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("request timed out"));
    }
}
