use axum::extract::{Path, Query, State};
use axum::{Json, Router};
use axum::routing::get;
use tracing::info;

use crate::errors::AppError;
use crate::models::{NewsQueryParams, NewsReport};
use crate::state::AppState;

const MAX_TICKER_LEN: usize = 16;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_news_by_query))
        .route("/:ticker", get(get_ticker_news))
}

/// Trim the ticker and check it looks like a symbol. Existence is up to the feed.
fn validate_ticker(raw: Option<&str>) -> Result<String, AppError> {
    let ticker = raw.map(str::trim).unwrap_or_default();

    if ticker.is_empty() {
        return Err(AppError::Validation("ticker is required".to_string()));
    }

    let valid_chars = ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
    if ticker.len() > MAX_TICKER_LEN || !valid_chars {
        return Err(AppError::Validation(format!("invalid ticker: {}", ticker)));
    }

    Ok(ticker.to_string())
}

/// GET /api/news/:ticker
///
/// Latest headlines for a ticker with per-headline sentiment.
/// An empty `items` list means no news; a failed fetch is a 502.
async fn get_ticker_news(
    Path(ticker): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<NewsReport>, AppError> {
    let ticker = validate_ticker(Some(ticker.as_str()))?;
    info!("GET /api/news/{} - Fetching ticker news", ticker);

    let report = state.news_service.report(&ticker).await?;
    Ok(Json(report))
}

/// GET /api/news?ticker=...
async fn get_news_by_query(
    Query(params): Query<NewsQueryParams>,
    State(state): State<AppState>,
) -> Result<Json<NewsReport>, AppError> {
    let ticker = validate_ticker(params.ticker.as_deref())?;
    info!("GET /api/news?ticker={} - Fetching ticker news", ticker);

    let report = state.news_service.report(&ticker).await?;
    Ok(Json(report))
}
