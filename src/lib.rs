//! Ticker news with headline sentiment.
//!
//! [`services::news_service::NewsService`] fetches a ticker's news from a
//! syndication feed and classifies every headline as positive, negative or
//! neutral. The axum app in [`app`] serves the result to the dashboard.

pub mod app;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
