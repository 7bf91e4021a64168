// src/api.rs
use std::sync::Arc;

use shuttle_axum::axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::display::{filter_news, NewsFilter};
use crate::ingest::types::{Category, NewsItem};
use crate::ingest::NewsPipeline;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<NewsPipeline>,
}

impl AppState {
    pub fn new(pipeline: NewsPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/news", get(news))
        .route("/news/categories", get(categories))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Runs the pipeline on every request; the optional query applies the UI filter.
async fn news(
    State(state): State<AppState>,
    Query(filter): Query<NewsFilter>,
) -> Json<Vec<NewsItem>> {
    let items = state.pipeline.fetch_news().await;
    Json(filter_news(items, &filter))
}

async fn categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(|c| c.label()).collect())
}
