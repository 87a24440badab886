pub mod google_news;
pub mod news_feed;
