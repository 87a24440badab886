use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::models::{SentimentLabel, SentimentResult};

/// A single news article taken from the feed
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Article {
    title: String,
    url: String,
    published_at: DateTime<Utc>,
}

impl Article {
    /// Returns `None` when the title is blank or the link is not an absolute URL.
    pub fn new(title: &str, link: &str, published_at: DateTime<Utc>) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        // Url::parse rejects relative references
        let url = Url::parse(link.trim()).ok()?;
        if url.cannot_be_a_base() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            url: url.into(),
            published_at,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
}

/// An article paired with the sentiment of its title
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewsItem {
    #[serde(flatten)]
    pub article: Article,
    pub sentiment: SentimentResult,
}

/// Per-label counts over a report's items
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SentimentSummary {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentSummary {
    pub fn from_items(items: &[NewsItem]) -> Self {
        items.iter().fold(Self::default(), |mut summary, item| {
            match item.sentiment.label() {
                SentimentLabel::Positive => summary.positive += 1,
                SentimentLabel::Neutral => summary.neutral += 1,
                SentimentLabel::Negative => summary.negative += 1,
            }
            summary
        })
    }
}

/// News for one ticker as returned to the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct NewsReport {
    pub ticker: String,
    pub fetched_at: DateTime<Utc>,
    pub items: Vec<NewsItem>,
    pub summary: SentimentSummary,
}

impl NewsReport {
    pub fn new(ticker: &str, items: Vec<NewsItem>) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            fetched_at: Utc::now(),
            summary: SentimentSummary::from_items(&items),
            items,
        }
    }
}

/// Query parameters for `GET /api/news`
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewsQueryParams {
    pub ticker: Option<String>,
}
