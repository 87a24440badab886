pub mod lexicon;
pub mod news_service;
pub mod sentiment_service;
