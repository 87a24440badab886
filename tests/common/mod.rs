#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use tickerfeed::services::news_service::{NewsConfig, NewsService};
use tickerfeed::state::AppState;

pub const FEED_PATH: &str = "/rss/search";

pub fn rss(items: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>Google News</title><link>https://news.google.com</link><description>Google News</description>
{items}
</channel></rss>"#
    )
}

pub fn item(title: &str, link: &str, pub_date: &str) -> String {
    format!(
        "<item><title>{title}</title><link>{link}</link><guid>{link}</guid><pubDate>{pub_date}</pubDate></item>"
    )
}

/// `count` items, newest first, an hour apart
pub fn items(count: usize) -> String {
    (0..count)
        .map(|n| {
            item(
                &format!("Headline {}", n),
                &format!("https://example.com/news/{}", n),
                &format!("Fri, 15 Mar 2024 {:02}:00:00 GMT", 23 - n),
            )
        })
        .collect()
}

/// Feed endpoint answering every request with `status` and `body`
pub fn feed_router(status: StatusCode, body: String) -> Router {
    Router::new().route(
        FEED_PATH,
        get(move || {
            let body = body.clone();
            async move { (status, [(header::CONTENT_TYPE, "application/rss+xml")], body) }
        }),
    )
}

/// Feed endpoint that only answers for the expected query, 400 otherwise
pub fn strict_feed_router(expected_q: &'static str, body: String) -> Router {
    Router::new().route(
        FEED_PATH,
        get(move |Query(params): Query<HashMap<String, String>>| {
            let body = body.clone();
            async move {
                let ok = params.get("q").map(String::as_str) == Some(expected_q)
                    && params.get("hl").map(String::as_str) == Some("en-US")
                    && params.get("gl").map(String::as_str) == Some("US")
                    && params.get("ceid").map(String::as_str) == Some("US:en");
                if ok {
                    (StatusCode::OK, body).into_response()
                } else {
                    (StatusCode::BAD_REQUEST, format!("unexpected query {:?}", params)).into_response()
                }
            }
        }),
    )
}

/// Feed endpoint that stalls longer than any test timeout
pub fn slow_feed_router() -> Router {
    Router::new().route(
        FEED_PATH,
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            rss("")
        }),
    )
}

/// Serve `router` on an ephemeral local port, returning the feed URL
pub async fn spawn_feed(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}{}", addr, FEED_PATH)
}

/// URL of a local port nothing listens on
pub async fn closed_feed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, FEED_PATH)
}

pub fn config(feed_url: &str) -> NewsConfig {
    NewsConfig {
        feed_url: feed_url.to_string(),
        timeout: Duration::from_secs(5),
        ..NewsConfig::default()
    }
}

pub fn service(feed_url: &str) -> NewsService {
    NewsService::from_config(&config(feed_url)).unwrap()
}

pub fn app_state(feed_url: &str) -> AppState {
    AppState {
        news_service: Arc::new(service(feed_url)),
    }
}
