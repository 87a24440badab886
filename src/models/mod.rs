mod news;
mod sentiment;

pub use news::{Article, NewsItem, NewsQueryParams, NewsReport, SentimentSummary};
pub use sentiment::{SentimentLabel, SentimentResult};
