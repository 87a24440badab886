use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use tracing::{debug, info, warn};
use url::Url;

use crate::external::news_feed::{NewsFeed, RetrievalCause, RetrievalError};
use crate::models::Article;
use crate::services::news_service::NewsConfig;

/// Google News RSS search, one query per ticker
pub struct GoogleNewsRss {
    client: reqwest::Client,
    base_url: Url,
    language: String,
    region: String,
    max_articles: usize,
    max_feed_bytes: usize,
}

impl GoogleNewsRss {
    pub fn new(config: &NewsConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.feed_url)
            .with_context(|| format!("invalid news feed url '{}'", config.feed_url))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(Duration::from_secs(5)))
            .user_agent(concat!("tickerfeed/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build news feed http client")?;

        Ok(Self {
            client,
            base_url,
            language: config.language.clone(),
            region: config.region.clone(),
            max_articles: config.max_articles,
            max_feed_bytes: config.max_feed_bytes,
        })
    }

    /// Search url for `<ticker> stock` in the configured locale
    pub fn query_url(&self, ticker: &str) -> Url {
        // ceid wants the bare language, e.g. "US:en" for "en-US"
        let lang = self.language.split('-').next().unwrap_or(&self.language);
        let ceid = format!("{}:{}", self.region, lang);

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", &format!("{} stock", ticker.trim()))
            .append_pair("hl", &self.language)
            .append_pair("gl", &self.region)
            .append_pair("ceid", &ceid);
        url
    }
}

#[async_trait]
impl NewsFeed for GoogleNewsRss {
    async fn fetch(&self, ticker: &str) -> Result<Vec<Article>, RetrievalError> {
        let url = self.query_url(ticker);
        info!("Fetching news feed for {}", ticker);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RetrievalError::new(ticker, transport_cause(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("News feed returned {} for {}", status, ticker);
            return Err(RetrievalError::new(
                ticker,
                RetrievalCause::Status(status.as_u16()),
            ));
        }

        let body = read_capped(resp, self.max_feed_bytes)
            .await
            .map_err(|cause| RetrievalError::new(ticker, cause))?;

        let articles = parse_feed(ticker, &body, self.max_articles)?;
        info!("Fetched {} news articles for {}", articles.len(), ticker);
        Ok(articles)
    }
}

/// Read the response body, failing once it grows past `limit` bytes
async fn read_capped(
    mut resp: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, RetrievalCause> {
    if resp.content_length().is_some_and(|len| len > limit as u64) {
        return Err(RetrievalCause::TooLarge(limit));
    }

    let mut body = Vec::new();
    while let Some(chunk) = resp.chunk().await.map_err(|e| transport_cause(&e))? {
        if body.len() + chunk.len() > limit {
            return Err(RetrievalCause::TooLarge(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn transport_cause(err: &reqwest::Error) -> RetrievalCause {
    if err.is_timeout() {
        RetrievalCause::Timeout
    } else {
        RetrievalCause::Transport(err.to_string())
    }
}

/// Parse a syndication document and keep the valid entries among the first `max_articles`.
pub fn parse_feed(
    ticker: &str,
    body: &[u8],
    max_articles: usize,
) -> Result<Vec<Article>, RetrievalError> {
    let feed = feed_rs::parser::parse(body).map_err(|e| {
        warn!("Failed to parse news feed for {}: {}", ticker, e);
        RetrievalError::new(ticker, RetrievalCause::MalformedFeed(e.to_string()))
    })?;

    // Feed order is trusted to be most recent first; truncate before validating
    let articles = feed
        .entries
        .into_iter()
        .take(max_articles)
        .filter_map(|entry| {
            let article = entry_to_article(&entry);
            if article.is_none() {
                debug!("Skipping feed entry {} for {}: missing title, link or publish date", entry.id, ticker);
            }
            article
        })
        .collect();

    Ok(articles)
}

fn entry_to_article(entry: &Entry) -> Option<Article> {
    let title = entry.title.as_ref()?;
    let link = entry.links.first()?;
    let published_at = publish_time(entry)?;

    Article::new(&title.content, &link.href, published_at)
}

/// Atom entries may only carry `updated`; RSS items only ever fill `published`.
fn publish_time(entry: &Entry) -> Option<DateTime<Utc>> {
    entry.published.or(entry.updated)
}
