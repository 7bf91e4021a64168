// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /news            (fallback path, full shape)
// - GET /news?category=  (filter)
// - GET /news/categories

use async_trait::async_trait;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt as _; // for `oneshot`

use visa_news_feed::api::{self, AppState};
use visa_news_feed::ingest::error::FetchError;
use visa_news_feed::ingest::types::{FeedFetcher, HttpResponse};
use visa_news_feed::{NewsPipeline, PipelineConfig};

const BODY_LIMIT: usize = 1024 * 1024;

struct Offline;

#[async_trait]
impl FeedFetcher for Offline {
    async fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
        Err(FetchError::Transport("offline".into()))
    }
    fn name(&self) -> &'static str {
        "offline"
    }
}

fn test_router() -> Router {
    let pipeline = NewsPipeline::with_fetcher(PipelineConfig::default(), Arc::new(Offline));
    api::router(AppState::new(pipeline))
}

async fn get_json(uri: &str) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    let resp = test_router().oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8").trim(), "OK");
}

#[tokio::test]
async fn news_offline_still_returns_items_with_full_shape() {
    let (status, v) = get_json("/news").await;
    assert_eq!(status, StatusCode::OK);

    let arr = v.as_array().expect("array");
    assert_eq!(arr.len(), 3);
    for it in arr {
        for key in [
            "id",
            "title",
            "summary",
            "category",
            "country",
            "publishedAt",
            "source",
            "urgent",
            "link",
        ] {
            assert!(it.get(key).is_some(), "missing '{key}'");
        }
    }
}

#[tokio::test]
async fn news_category_filter_applies() {
    let (status, v) = get_json("/news?category=Legal%20News").await;
    assert_eq!(status, StatusCode::OK);
    let arr = v.as_array().expect("array");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["category"], "Legal News");
}

#[tokio::test]
async fn news_search_filter_applies() {
    let (_, v) = get_json("/news?search=h-1b&country=all").await;
    let arr = v.as_array().expect("array");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["category"], "Work Visa");
}

#[tokio::test]
async fn categories_lists_all_labels() {
    let (status, v) = get_json("/news/categories").await;
    assert_eq!(status, StatusCode::OK);
    let arr = v.as_array().expect("array");
    assert_eq!(arr.len(), 10);
    assert_eq!(arr[0], "Work Visa");
    assert_eq!(arr[9], "General News");
}
