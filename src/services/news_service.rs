use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::external::google_news::GoogleNewsRss;
use crate::external::news_feed::{NewsFeed, RetrievalError};
use crate::models::{NewsItem, NewsReport};
use crate::services::sentiment_service::SentimentClassifier;

const DEFAULT_FEED_URL: &str = "https://news.google.com/rss/search";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_ARTICLES: usize = 10;
const DEFAULT_MAX_FEED_BYTES: usize = 2 * 1024 * 1024;

/// Configuration for the news feed
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub feed_url: String,
    /// Content language, e.g. "en-US"
    pub language: String,
    /// Country code, e.g. "US"
    pub region: String,
    pub timeout: Duration,
    pub max_articles: usize,
    /// Largest feed body accepted, in bytes
    pub max_feed_bytes: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            language: "en-US".to_string(),
            region: "US".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_articles: DEFAULT_MAX_ARTICLES,
            max_feed_bytes: DEFAULT_MAX_FEED_BYTES,
        }
    }
}

impl NewsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            feed_url: std::env::var("NEWS_FEED_URL").unwrap_or(defaults.feed_url),
            language: std::env::var("NEWS_FEED_LANGUAGE").unwrap_or(defaults.language),
            region: std::env::var("NEWS_FEED_REGION").unwrap_or(defaults.region),
            timeout: Duration::from_secs(env_or("NEWS_FEED_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            max_articles: env_or("NEWS_MAX_ARTICLES", DEFAULT_MAX_ARTICLES),
            max_feed_bytes: env_or("NEWS_FEED_MAX_BYTES", DEFAULT_MAX_FEED_BYTES),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout.is_zero() {
            return Err("NEWS_FEED_TIMEOUT_SECS must be greater than zero".to_string());
        }
        if self.max_articles == 0 {
            return Err("NEWS_MAX_ARTICLES must be greater than zero".to_string());
        }
        if self.max_feed_bytes == 0 {
            return Err("NEWS_FEED_MAX_BYTES must be greater than zero".to_string());
        }
        if self.language.trim().is_empty() || self.region.trim().is_empty() {
            return Err("NEWS_FEED_LANGUAGE and NEWS_FEED_REGION must not be empty".to_string());
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{}' for {}, using default", raw, key);
            default
        }),
        Err(_) => default,
    }
}

/// Fetches a ticker's news and classifies each headline
pub struct NewsService {
    feed: Arc<dyn NewsFeed>,
    classifier: SentimentClassifier,
}

impl NewsService {
    pub fn new(feed: Arc<dyn NewsFeed>, classifier: SentimentClassifier) -> Self {
        Self { feed, classifier }
    }

    /// Google News RSS feed with the lexicon classifier
    pub fn from_config(config: &NewsConfig) -> anyhow::Result<Self> {
        config.validate().map_err(anyhow::Error::msg)?;
        info!(
            "Initializing news feed {} (hl={}, gl={}, timeout={:?}, max={})",
            config.feed_url, config.language, config.region, config.timeout, config.max_articles
        );

        let feed = GoogleNewsRss::new(config)?;
        Ok(Self::new(Arc::new(feed), SentimentClassifier::default()))
    }

    /// Fetch news for a ticker and attach a sentiment to every headline.
    ///
    /// A retrieval failure fails the whole call. A headline that cannot be
    /// classified is dropped; the rest keep the feed's order.
    pub async fn analyze(&self, ticker: &str) -> Result<Vec<NewsItem>, RetrievalError> {
        let articles = self.feed.fetch(ticker).await?;
        let fetched = articles.len();

        let items: Vec<NewsItem> = articles
            .into_iter()
            .filter_map(|article| match self.classifier.classify(article.title()) {
                Ok(sentiment) => Some(NewsItem { article, sentiment }),
                Err(e) => {
                    warn!(
                        "Skipping article '{}' for {}: {}",
                        article.title(),
                        ticker,
                        e
                    );
                    None
                }
            })
            .collect();

        info!(
            "Classified {} of {} news articles for {}",
            items.len(),
            fetched,
            ticker
        );
        Ok(items)
    }

    pub async fn report(&self, ticker: &str) -> Result<NewsReport, RetrievalError> {
        let items = self.analyze(ticker).await?;
        Ok(NewsReport::new(ticker, items))
    }
}
